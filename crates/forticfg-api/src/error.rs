use thiserror::Error;

/// Top-level error type for the `forticfg-api` crate.
///
/// Covers every failure mode of the CMDB transport: authentication,
/// HTTP, envelope-level API errors, and payload decoding.
/// `forticfg-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The gateway rejected the access token (401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Throttled by the gateway. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── CMDB API ────────────────────────────────────────────────────
    /// Structured error from the CMDB envelope (`status != "success"`
    /// or an HTTP error status with a CLI error code).
    #[error("CMDB API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// Negative CLI error code from the envelope, when present.
        code: Option<i64>,
        message: String,
    },

    /// The requested object does not exist on the device.
    #[error("Object not found: {}{}", .path, .mkey.as_deref().map(|m| format!("/{m}")).unwrap_or_default())]
    NotFound { path: String, mkey: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the token was rejected
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying once.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Extract the CLI error code from the envelope, if available.
    pub fn cli_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}
