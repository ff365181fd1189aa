//! System objects: interfaces and zones.

use std::sync::LazyLock;

use crate::resource::{CmdbPath, ResourceDef};
use crate::schema::{Schema, TableDef};

/// `system interface` — physical and virtual interfaces. The
/// `secondaryip` table is keyed by an auto-numbered integer id.
pub static INTERFACE: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "system.interface",
    path: CmdbPath::new("system", "interface"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("vdom")
        .str("type")
        .str("mode")
        .str("ip")
        .str("allowaccess")
        .str("status")
        .str("alias")
        .str("description")
        .str("role")
        .int("mtu")
        .str("mtu_override")
        .int("vlanid")
        .str("interface")
        .table(
            "secondaryip",
            TableDef::set(
                "id",
                Schema::builder()
                    .req_int("id")
                    .str("ip")
                    .str("allowaccess")
                    .build(),
            ),
        )
        .build(),
});

/// `system zone` — interface zones. The member table is keyed by
/// `interface-name` rather than the usual `name`.
pub static ZONE: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "system.zone",
    path: CmdbPath::new("system", "zone"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("intrazone")
        .str("description")
        .table(
            "interface",
            TableDef::set(
                "interface_name",
                Schema::builder().req_str("interface_name").build(),
            ),
        )
        .build(),
});
