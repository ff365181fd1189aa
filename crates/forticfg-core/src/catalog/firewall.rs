//! Firewall objects: addresses, address groups, policies, custom services.

use std::sync::LazyLock;

use crate::resource::{CmdbPath, ResourceDef};
use crate::schema::Schema;

use super::name_table;

/// `firewall address` — named IP objects (subnets, ranges, FQDNs).
pub static ADDRESS: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "firewall.address",
    path: CmdbPath::new("firewall", "address"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("uuid")
        .str("type")
        .str("subnet")
        .str("start_ip")
        .str("end_ip")
        .str("fqdn")
        .str("interface")
        .wire_name("associated-interface")
        .str("allow_routing")
        .str("comment")
        .int("color")
        .build(),
});

/// `firewall addrgrp` — groups of address objects.
pub static ADDRGRP: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "firewall.addrgrp",
    path: CmdbPath::new("firewall", "addrgrp"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("uuid")
        .table("member", name_table())
        .str("exclude")
        .table("exclude_member", name_table())
        .str("allow_routing")
        .str("comment")
        .int("color")
        .build(),
});

/// `firewall policy` — the main IPv4 policy table. Keyed by `policyid`,
/// auto-assigned by the device when created as 0.
pub static POLICY: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "firewall.policy",
    path: CmdbPath::new("firewall", "policy"),
    mkey: "policyid",
    schema: Schema::builder()
        .int("policyid")
        .req_str("name")
        .str("uuid")
        .table("srcintf", name_table())
        .table("dstintf", name_table())
        .table("srcaddr", name_table())
        .table("dstaddr", name_table())
        .str("action")
        .str("status")
        .str("schedule")
        .table("service", name_table())
        .str("nat")
        .str("ippool")
        .str("logtraffic")
        .str("utm_status")
        .str("inspection_mode")
        .str("comments")
        .build(),
});

/// `firewall service custom` — user-defined TCP/UDP/IP services.
pub static SERVICE_CUSTOM: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "firewall.service.custom",
    path: CmdbPath::new("firewall.service", "custom"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("category")
        .str("protocol")
        .str("tcp_portrange")
        .str("udp_portrange")
        .str("sctp_portrange")
        .int("protocol_number")
        .str("visibility")
        .str("comment")
        .int("color")
        .build(),
});
