//! High-level configuration handle.
//!
//! [`Cmdb`] wraps the raw transport client with the schema engine: reads
//! come back flattened and normalized, writes are validated and expanded
//! before they leave the process. One handle operates in one scope
//! (a VDOM or the global table).

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use forticfg_api::{CmdbClient, Scope};

use crate::config::ConnectionConfig;
use crate::error::CoreError;
use crate::expand::{expand, expand_partial};
use crate::flatten::flatten;
use crate::resource::ResourceDef;

/// Schema-aware handle over one gateway connection and scope.
pub struct Cmdb {
    client: Arc<CmdbClient>,
    scope: Scope,
}

impl Cmdb {
    /// Open a handle from a resolved connection config.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, CoreError> {
        let client =
            CmdbClient::from_token(config.url.as_str(), &config.token, &config.transport())?;
        Ok(Self {
            client: Arc::new(client),
            scope: config.scope.clone(),
        })
    }

    /// Wrap an existing client (used by tests with a mock gateway).
    pub fn from_client(client: CmdbClient, scope: Scope) -> Self {
        Self {
            client: Arc::new(client),
            scope,
        }
    }

    /// The scope this handle operates in.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// List every object of a type, flattened and normalized.
    pub async fn list(&self, def: &ResourceDef) -> Result<Vec<Map<String, Value>>, CoreError> {
        let raw = self.client.list(&def.path.endpoint(), &self.scope).await?;
        debug!(resource = def.name, count = raw.len(), "listed objects");

        raw.iter()
            .map(|item| flatten(&def.schema, item).map_err(CoreError::from))
            .collect()
    }

    /// Fetch one object by mkey, flattened and normalized.
    pub async fn get(&self, def: &ResourceDef, mkey: &str) -> Result<Map<String, Value>, CoreError> {
        let raw = self
            .client
            .get(&def.path.endpoint(), mkey, &self.scope)
            .await
            .map_err(|e| not_found_context(def, mkey, e))?;
        Ok(flatten(&def.schema, &raw)?)
    }

    /// Returns `true` if the object exists.
    pub async fn exists(&self, def: &ResourceDef, mkey: &str) -> Result<bool, CoreError> {
        match self.get(def, mkey).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create a new object. Returns the assigned mkey (auto-numbered for
    /// integer-keyed tables when the key is supplied as 0 or omitted).
    pub async fn create(
        &self,
        def: &ResourceDef,
        attrs: &Map<String, Value>,
    ) -> Result<String, CoreError> {
        let body = expand(&def.schema, attrs)?;
        let mkey = self
            .client
            .create(&def.path.endpoint(), &self.scope, &body)
            .await?;
        info!(resource = def.name, mkey = %mkey, "created object");
        Ok(mkey)
    }

    /// Update an existing object with a partial attribute map.
    pub async fn update(
        &self,
        def: &ResourceDef,
        mkey: &str,
        attrs: &Map<String, Value>,
    ) -> Result<(), CoreError> {
        let body = expand_partial(&def.schema, attrs)?;
        self.client
            .update(&def.path.endpoint(), mkey, &self.scope, &body)
            .await
            .map_err(|e| not_found_context(def, mkey, e))?;
        info!(resource = def.name, mkey = %mkey, "updated object");
        Ok(())
    }

    /// Update-or-create: update the object if it exists, otherwise create
    /// it with the mkey attribute filled in. Returns the effective mkey.
    pub async fn set(
        &self,
        def: &ResourceDef,
        mkey: &str,
        attrs: &Map<String, Value>,
    ) -> Result<String, CoreError> {
        match self.update(def, mkey, attrs).await {
            Ok(()) => Ok(mkey.to_owned()),
            Err(e) if e.is_not_found() => {
                let mut create_attrs = attrs.clone();
                create_attrs
                    .entry(def.mkey.to_owned())
                    .or_insert_with(|| def.mkey_value(mkey));
                self.create(def, &create_attrs).await
            }
            Err(e) => Err(e),
        }
    }

    /// Delete an object. Deleting an absent object is `NotFound`.
    pub async fn delete(&self, def: &ResourceDef, mkey: &str) -> Result<(), CoreError> {
        self.client
            .delete(&def.path.endpoint(), mkey, &self.scope)
            .await
            .map_err(|e| not_found_context(def, mkey, e))?;
        info!(resource = def.name, mkey = %mkey, "deleted object");
        Ok(())
    }

}

/// Attach the catalog name to not-found errors so users see
/// `firewall.address 'lan' not found` instead of an endpoint path.
fn not_found_context(def: &ResourceDef, mkey: &str, err: forticfg_api::Error) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            resource: def.name.to_owned(),
            mkey: mkey.to_owned(),
        }
    } else {
        err.into()
    }
}
