//! Switch-controller objects (managed FortiSwitch units).

use std::sync::LazyLock;

use crate::resource::{CmdbPath, ResourceDef};
use crate::schema::{Schema, TableDef};

/// `switch-controller managed-switch` — a managed switch and its port
/// table. Ports keep wire order (the device lists them physically).
pub static MANAGED_SWITCH: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "switch-controller.managed-switch",
    path: CmdbPath::new("switch-controller", "managed-switch"),
    mkey: "switch_id",
    schema: Schema::builder()
        .req_str("switch_id")
        .str("description")
        .str("fsw_wan1_admin")
        .str("fsw_wan1_peer")
        .str("poe_detection_type")
        .table(
            "ports",
            TableDef::sequence(
                "port_name",
                Schema::builder()
                    .req_str("port_name")
                    .str("vlan")
                    .str("allowed_vlans_all")
                    .str("poe_status")
                    .str("status")
                    .str("description")
                    .int("speed")
                    .build(),
            ),
        )
        .build(),
});
