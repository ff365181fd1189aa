//! CMDB response envelope.
//!
//! Every CMDB endpoint wraps its payload in a common envelope carrying
//! `status`, the HTTP status echo, the affected `mkey`, and on CLI
//! failures a negative `error` code. The client strips this before the
//! caller sees any data.

use serde::Deserialize;
use serde_json::Value;

/// The `{ status, http_status, results, mkey, ... }` envelope returned
/// by every CMDB endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// `"success"` or `"error"`.
    #[serde(default)]
    pub status: Option<String>,

    /// Echo of the HTTP status code.
    #[serde(default)]
    pub http_status: Option<u16>,

    /// The payload: an array for collection GETs, an array-of-one (or a
    /// bare object) for single-object GETs, absent on writes.
    #[serde(default)]
    pub results: Option<Value>,

    /// The mkey of the object affected by a write. Strings for named
    /// objects, numbers for auto-assigned ids (e.g. `policyid`).
    #[serde(default)]
    pub mkey: Option<Value>,

    /// Configuration revision after a successful write.
    #[serde(default)]
    pub revision: Option<String>,

    /// Negative CLI error code on failure (e.g. `-5` for entry not found).
    #[serde(default)]
    pub error: Option<i64>,

    /// Human-readable CLI error text, when the gateway provides one.
    #[serde(default)]
    pub cli_error: Option<String>,
}

impl Envelope {
    /// Returns `true` if the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// The affected mkey rendered as a string, if any.
    pub fn mkey_string(&self) -> Option<String> {
        match &self.mkey {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}
