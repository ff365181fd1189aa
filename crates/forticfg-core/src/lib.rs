// forticfg-core: Schema model, flatten/expand engine, and resource catalog
// sitting between forticfg-api and consumers (CLI, automation).

pub mod catalog;
pub mod cmdb;
pub mod config;
pub mod diff;
pub mod error;
pub mod expand;
pub mod flatten;
pub mod resource;
pub mod schema;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cmdb::Cmdb;
pub use config::{ConnectionConfig, TlsVerification};
pub use diff::{Change, diff};
pub use error::CoreError;
pub use expand::{expand, expand_partial};
pub use flatten::flatten;
pub use resource::{CmdbPath, MkeyKind, ResourceDef};
pub use schema::{Field, FieldKind, Schema, SchemaError, TableDef};

// Re-export the scope type; it appears in every consumer signature.
pub use forticfg_api::Scope;
