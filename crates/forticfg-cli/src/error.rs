//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use forticfg_core::CoreError;

/// Stable exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to gateway at {url}")]
    #[diagnostic(
        code(forticfg::connection_failed),
        help(
            "Check that the gateway is reachable and the REST API is enabled.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Gateway request timed out")]
    #[diagnostic(
        code(forticfg::timeout),
        help("Increase --timeout or check gateway load.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(forticfg::auth_failed),
        help(
            "Verify the access token for profile '{profile}'.\n\
             Generate one under System > Administrators > REST API Admin,\n\
             then run: forticfg config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No access token configured for profile '{profile}'")]
    #[diagnostic(
        code(forticfg::no_token),
        help(
            "Configure a profile with: forticfg config init\n\
             Or set the FORTICFG_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    #[error("No gateway configured")]
    #[diagnostic(
        code(forticfg::no_config),
        help(
            "No profile found in {path} and no --host flag given.\n\
             Run: forticfg config init"
        )
    )]
    NoConfig { path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{mkey}' not found")]
    #[diagnostic(
        code(forticfg::not_found),
        help("Run: forticfg list {resource} to see existing objects")
    )]
    NotFound { resource: String, mkey: String },

    #[error("Unknown object type '{name}'")]
    #[diagnostic(
        code(forticfg::unknown_type),
        help("Run: forticfg paths to list the catalog")
    )]
    UnknownResource { name: String },

    // ── Validation / rejection ───────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(forticfg::validation))]
    Validation { field: String, reason: String },

    #[error("Change rejected by gateway: {message}")]
    #[diagnostic(
        code(forticfg::rejected),
        help("CLI error code: {code}. The object may be referenced or duplicated.")
    )]
    Rejected { message: String, code: i64 },

    // ── Wrapped / passthrough ────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(forticfg::core))]
    Core(CoreError),

    #[error("Config error: {0}")]
    #[diagnostic(code(forticfg::config))]
    Config(#[from] forticfg_config::ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(forticfg::io))]
    Io(#[from] std::io::Error),

    #[error("Operation cancelled")]
    #[diagnostic(code(forticfg::cancelled))]
    Cancelled,
}

impl CliError {
    /// Map this error to its exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::UnknownResource { .. } | Self::Validation { .. } | Self::NoConfig { .. } => {
                exit_code::VALIDATION
            }
            Self::Rejected { .. } => exit_code::REJECTED,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a core error, attaching the active profile name for
    /// auth diagnostics.
    pub fn from_core(err: CoreError, profile: &str) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { .. } => Self::AuthFailed {
                profile: profile.to_owned(),
            },
            CoreError::NotFound { resource, mkey } => Self::NotFound { resource, mkey },
            CoreError::UnknownResource { name } => Self::UnknownResource { name },
            CoreError::Validation(e) => Self::Validation {
                field: "attributes".into(),
                reason: e.to_string(),
            },
            CoreError::Rejected { message, code } => Self::Rejected {
                message,
                code: code.unwrap_or_default(),
            },
            other => Self::Core(other),
        }
    }
}
