// Hand-crafted async HTTP client for the FortiGate CMDB configuration API.
//
// Base path: /api/v2/cmdb/
// Auth: Authorization bearer token

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::envelope::Envelope;
use crate::transport::TransportConfig;

/// Characters escaped inside an mkey path segment.
///
/// mkeys are user-chosen object names and may contain `/`, spaces, or query
/// metacharacters; all of them must travel as a single path segment.
const MKEY_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Configuration scope for a CMDB request.
///
/// Table-level objects live either in a VDOM or in the global
/// configuration; the scope travels as a query parameter on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Scoped to the named virtual domain.
    Vdom(String),
    /// Global configuration scope.
    Global,
}

impl Default for Scope {
    fn default() -> Self {
        Self::Vdom("root".into())
    }
}

impl Scope {
    /// The query pair this scope contributes to a request.
    fn query_pair(&self) -> (&'static str, String) {
        match self {
            Self::Vdom(name) => ("vdom", name.clone()),
            Self::Global => ("global", "1".into()),
        }
    }
}

/// Async client for the CMDB configuration API.
///
/// Exposes generic collection/object verbs; the object `path`
/// (e.g. `"firewall/policy"`) and the mkey are supplied per call, so one
/// client serves every resource type. The envelope is stripped before the
/// caller sees any payload, and transient failures are retried once.
pub struct CmdbClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CmdbClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` as a default header on
    /// every request, marked sensitive so it never appears in logs.
    pub fn from_token(
        base_url: &str,
        token: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL ending in `/api/v2/cmdb/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api/v2/cmdb") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v2/cmdb/"));
        }
        Ok(url)
    }

    /// The gateway base URL (ends in `/api/v2/cmdb/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a collection path (e.g. `"firewall/policy"`) onto the base URL.
    fn collection_url(&self, path: &str, scope: &Scope) -> Result<Url, Error> {
        let mut url = self.base_url.join(path.trim_matches('/'))?;
        let (k, v) = scope.query_pair();
        url.query_pairs_mut().append_pair(k, &v);
        Ok(url)
    }

    /// Join an object path: `{collection}/{percent-encoded mkey}`.
    fn object_url(&self, path: &str, mkey: &str, scope: &Scope) -> Result<Url, Error> {
        let encoded = utf8_percent_encode(mkey, MKEY_SEGMENT).to_string();
        let full = format!("{}/{}", path.trim_matches('/'), encoded);
        let mut url = self.base_url.join(&full)?;
        let (k, v) = scope.query_pair();
        url.query_pairs_mut().append_pair(k, &v);
        Ok(url)
    }

    // ── Generic CRUD verbs ───────────────────────────────────────────

    /// Fetch every object in a table. Returns the raw per-object values;
    /// schema-level flattening happens in `forticfg-core`.
    pub async fn list(&self, path: &str, scope: &Scope) -> Result<Vec<Value>, Error> {
        let url = self.collection_url(path, scope)?;
        let envelope = self.send(reqwest::Method::GET, url, None).await?;

        match envelope.results {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Ok(vec![other]),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch a single object by mkey.
    ///
    /// The gateway returns single objects as a one-element `results`
    /// array; a bare object is accepted too. An empty array means the
    /// object does not exist.
    pub async fn get(&self, path: &str, mkey: &str, scope: &Scope) -> Result<Value, Error> {
        let url = self.object_url(path, mkey, scope)?;
        let envelope = self
            .send(reqwest::Method::GET, url, None)
            .await
            .map_err(|e| map_not_found(e, path, Some(mkey)))?;

        match envelope.results {
            Some(Value::Array(mut items)) if !items.is_empty() => Ok(items.remove(0)),
            Some(obj @ Value::Object(_)) => Ok(obj),
            _ => Err(Error::NotFound {
                path: path.to_owned(),
                mkey: Some(mkey.to_owned()),
            }),
        }
    }

    /// Create a new object. Returns the assigned mkey (the gateway echoes
    /// user-chosen names and fills in auto-assigned integer ids).
    pub async fn create(&self, path: &str, scope: &Scope, body: &Value) -> Result<String, Error> {
        let url = self.collection_url(path, scope)?;
        let envelope = self.send(reqwest::Method::POST, url, Some(body)).await?;

        envelope.mkey_string().ok_or_else(|| Error::Deserialization {
            message: "create response missing mkey".into(),
            body: format!("{envelope:?}"),
        })
    }

    /// Update an existing object in place.
    pub async fn update(
        &self,
        path: &str,
        mkey: &str,
        scope: &Scope,
        body: &Value,
    ) -> Result<(), Error> {
        let url = self.object_url(path, mkey, scope)?;
        self.send(reqwest::Method::PUT, url, Some(body))
            .await
            .map_err(|e| map_not_found(e, path, Some(mkey)))?;
        Ok(())
    }

    /// Delete an object. Deleting an absent object is `Error::NotFound`;
    /// callers decide whether that is tolerable.
    pub async fn delete(&self, path: &str, mkey: &str, scope: &Scope) -> Result<(), Error> {
        let url = self.object_url(path, mkey, scope)?;
        self.send(reqwest::Method::DELETE, url, None)
            .await
            .map_err(|e| map_not_found(e, path, Some(mkey)))?;
        Ok(())
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Send a request, retrying exactly once on a transient failure.
    async fn send(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Envelope, Error> {
        match self.send_once(method.clone(), url.clone(), body).await {
            Err(e) if e.is_transient() => {
                if let Error::RateLimited { retry_after_secs } = &e {
                    tokio::time::sleep(std::time::Duration::from_secs(*retry_after_secs)).await;
                }
                debug!("retrying {method} {url} after transient error: {e}");
                self.send_once(method, url, body).await
            }
            other => other,
        }
    }

    async fn send_once(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Envelope, Error> {
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(Error::Transport)?;

        self.handle_response(resp).await
    }

    /// Parse the envelope, mapping HTTP-level and envelope-level failures
    /// into `Error` variants.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<Envelope, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: "access token rejected by the gateway".into(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_secs: parse_retry_after(resp.headers()),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if status.is_success() && envelope.is_success() {
            return Ok(envelope);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::Api {
                status: 404,
                code: envelope.error,
                message: envelope
                    .cli_error
                    .unwrap_or_else(|| "entry not found".into()),
            });
        }

        Err(Error::Api {
            status: envelope.http_status.unwrap_or_else(|| status.as_u16()),
            code: envelope.error,
            message: envelope.cli_error.unwrap_or_else(|| {
                envelope
                    .status
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            }),
        })
    }

}

/// Longest `Retry-After` the client will honor before its single retry.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Parse and clamp the `Retry-After` header of a 429 response.
/// Missing or unparseable headers fall back to one second.
fn parse_retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(1)
        .min(MAX_RETRY_AFTER_SECS)
}

/// Rewrite generic 404 API errors into `NotFound` with object context.
fn map_not_found(err: Error, path: &str, mkey: Option<&str>) -> Error {
    if err.is_not_found() {
        Error::NotFound {
            path: path.to_owned(),
            mkey: mkey.map(str::to_owned),
        }
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, RETRY_AFTER};

    use super::*;

    #[test]
    fn retry_after_is_clamped() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("99999"));
        assert_eq!(parse_retry_after(&headers), MAX_RETRY_AFTER_SECS);
    }

    #[test]
    fn short_retry_after_passes_through() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
        assert_eq!(parse_retry_after(&headers), 2);
    }

    #[test]
    fn missing_or_malformed_retry_after_defaults_to_one_second() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), 1);

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct"));
        assert_eq!(parse_retry_after(&headers), 1);
    }
}
