//! Catalog of manageable object types, grouped by configuration category
//! the way the device CLI groups them.
//!
//! Each module declares `LazyLock<ResourceDef>` statics; `all()` and
//! `find()` are the only lookup surface consumers need.

pub mod firewall;
pub mod router;
pub mod switch_controller;
pub mod system;
pub mod wireless_controller;

use crate::resource::ResourceDef;
use crate::schema::{Schema, TableDef};

/// Every resource definition in the catalog, in category order.
pub fn all() -> Vec<&'static ResourceDef> {
    vec![
        &firewall::ADDRESS,
        &firewall::ADDRGRP,
        &firewall::POLICY,
        &firewall::SERVICE_CUSTOM,
        &router::STATIC,
        &system::INTERFACE,
        &system::ZONE,
        &switch_controller::MANAGED_SWITCH,
        &wireless_controller::VAP,
        &wireless_controller::WTP_PROFILE,
    ]
}

/// Look up a resource definition by catalog name (`"firewall.address"`)
/// or endpoint path (`"firewall/address"`).
pub fn find(name: &str) -> Option<&'static ResourceDef> {
    all()
        .into_iter()
        .find(|def| def.name == name || def.path.endpoint() == name)
}

/// The ubiquitous name-keyed member table (`srcaddr`, `member`,
/// `interface-name` lists and friends all share this shape).
pub(crate) fn name_table() -> TableDef {
    TableDef::set("name", Schema::builder().req_str("name").build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MkeyKind;

    #[test]
    fn find_accepts_catalog_name_and_endpoint_path() {
        assert!(find("firewall.address").is_some());
        assert!(find("firewall/address").is_some());
        assert!(find("firewall.service.custom").is_some());
        assert!(find("no.such.thing").is_none());
    }

    #[test]
    fn every_definition_has_its_mkey_in_schema() {
        for def in all() {
            assert!(
                def.schema.field(def.mkey).is_some(),
                "{}: mkey '{}' missing from schema",
                def.name,
                def.mkey
            );
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = all().iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn policy_and_static_route_use_integer_mkeys() {
        assert_eq!(firewall::POLICY.mkey_kind(), MkeyKind::Int);
        assert_eq!(router::STATIC.mkey_kind(), MkeyKind::Int);
        assert_eq!(firewall::ADDRESS.mkey_kind(), MkeyKind::Str);
    }
}
