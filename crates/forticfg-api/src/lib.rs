// forticfg-api: Async Rust client for the FortiGate CMDB configuration API

pub mod client;
pub mod envelope;
pub mod error;
pub mod transport;

pub use client::{CmdbClient, Scope};
pub use envelope::Envelope;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
