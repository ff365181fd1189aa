// ── Core error types ──
//
// User-facing errors from forticfg-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<forticfg_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::schema::SchemaError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to gateway at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Gateway request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{resource} '{mkey}' not found")]
    NotFound { resource: String, mkey: String },

    #[error("Unknown resource type: {name}")]
    UnknownResource { name: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] SchemaError),

    // ── Operation errors ─────────────────────────────────────────────
    /// The gateway accepted the request but refused the change
    /// (duplicate entry, referenced object, invalid value).
    #[error("Change rejected by gateway: {message}")]
    Rejected { message: String, code: Option<i64> },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<forticfg_api::Error> for CoreError {
    fn from(err: forticfg_api::Error) -> Self {
        use forticfg_api::Error as Api;

        match err {
            Api::Authentication { message } => Self::AuthenticationFailed { message },
            Api::Transport(e) if e.is_timeout() => Self::Timeout,
            Api::Transport(e) if e.is_connect() => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            Api::NotFound { path, mkey } => Self::NotFound {
                resource: path,
                mkey: mkey.unwrap_or_default(),
            },
            // CLI error codes indicate the device refused the change
            // rather than a protocol failure.
            Api::Api { code: Some(code), message, .. } => Self::Rejected {
                message,
                code: Some(code),
            },
            Api::Api { status, message, .. } => Self::Api {
                message,
                status: Some(status),
            },
            Api::Tls(message) => Self::ConnectionFailed {
                url: String::new(),
                reason: message,
            },
            other => Self::Api {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl CoreError {
    /// Returns `true` if this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
