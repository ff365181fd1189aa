//! Connection configuration handed to [`crate::Cmdb::connect`].
//!
//! `forticfg-config` resolves profiles/env/keyring into this struct; the
//! CLI can also assemble one straight from flags.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use forticfg_api::{Scope, TlsMode, TransportConfig};

/// TLS verification policy for the gateway connection.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Verify against the system certificate store.
    #[default]
    SystemDefaults,
    /// Verify against a custom CA certificate (PEM file).
    CustomCa(PathBuf),
    /// Accept any certificate (factory self-signed gateways).
    DangerAcceptInvalid,
}

/// Everything needed to open a CMDB session.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Gateway base URL, e.g. `https://192.168.1.99`.
    pub url: Url,
    /// REST API access token.
    pub token: SecretString,
    /// Configuration scope the session operates in.
    pub scope: Scope,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Translate into the api crate's transport config.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
