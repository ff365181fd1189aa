//! Resource definitions: one [`ResourceDef`] per CMDB object type.
//!
//! A definition ties together the endpoint path, the mkey attribute, and
//! the schema. The generic engine ([`crate::Cmdb`], flatten/expand) does
//! the rest — adding a new object type to the catalog is one declaration.

use crate::schema::{FieldKind, Schema};

/// Endpoint path of a CMDB table: `{category}/{object}`.
///
/// Categories mirror the device CLI tree (`firewall`, `router`,
/// `switch-controller`, ...); service objects use the dotted
/// `firewall.service` category the wire expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmdbPath {
    pub category: &'static str,
    pub object: &'static str,
}

impl CmdbPath {
    pub const fn new(category: &'static str, object: &'static str) -> Self {
        Self { category, object }
    }

    /// The request path under `/api/v2/cmdb/`.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.category, self.object)
    }
}

/// Kind of the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MkeyKind {
    /// User-chosen object name.
    Str,
    /// Numeric id, auto-assigned by the device when created as `0`.
    Int,
}

/// Complete definition of one manageable object type.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    /// Catalog name, e.g. `"firewall.address"`.
    pub name: &'static str,
    pub path: CmdbPath,
    /// Local name of the key attribute (`"name"`, `"policyid"`, ...).
    pub mkey: &'static str,
    pub schema: Schema,
}

impl ResourceDef {
    /// The kind of this resource's mkey, read off the schema.
    pub fn mkey_kind(&self) -> MkeyKind {
        match self.schema.field(self.mkey).map(|f| &f.kind) {
            Some(FieldKind::Int) => MkeyKind::Int,
            _ => MkeyKind::Str,
        }
    }

    /// Coerce a caller-supplied mkey string into the attribute value the
    /// schema expects (`"17"` → `17` for integer keys).
    pub fn mkey_value(&self, mkey: &str) -> serde_json::Value {
        match self.mkey_kind() {
            MkeyKind::Int => mkey
                .trim()
                .parse::<i64>()
                .map_or_else(|_| serde_json::Value::String(mkey.to_owned()), Into::into),
            MkeyKind::Str => serde_json::Value::String(mkey.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_category_and_object() {
        assert_eq!(CmdbPath::new("firewall", "policy").endpoint(), "firewall/policy");
        assert_eq!(
            CmdbPath::new("firewall.service", "custom").endpoint(),
            "firewall.service/custom"
        );
    }

    #[test]
    fn mkey_kind_follows_schema() {
        let def = ResourceDef {
            name: "router.static",
            path: CmdbPath::new("router", "static"),
            mkey: "seq_num",
            schema: Schema::builder().req_int("seq_num").str("dst").build(),
        };
        assert_eq!(def.mkey_kind(), MkeyKind::Int);
        assert_eq!(def.mkey_value("17"), serde_json::json!(17));
    }
}
