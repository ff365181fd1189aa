//! Wireless-controller objects (SSIDs and AP profiles).

use std::sync::LazyLock;

use crate::resource::{CmdbPath, ResourceDef};
use crate::schema::{Schema, TableDef};

/// `wireless-controller vap` — an SSID definition.
pub static VAP: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "wireless-controller.vap",
    path: CmdbPath::new("wireless-controller", "vap"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("ssid")
        .str("security")
        .str("passphrase")
        .str("broadcast_ssid")
        .str("schedule")
        .int("vlanid")
        .str("quarantine")
        .str("comment")
        .build(),
});

/// `wireless-controller wtp-profile` — an AP hardware profile, with a
/// split-tunneling ACL table keyed by integer id.
pub static WTP_PROFILE: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "wireless-controller.wtp-profile",
    path: CmdbPath::new("wireless-controller", "wtp-profile"),
    mkey: "name",
    schema: Schema::builder()
        .req_str("name")
        .str("comment")
        .str("ap_country")
        .int("handoff_rssi")
        .int("handoff_sta_thresh")
        .int("max_clients")
        .str("led_state")
        .str("dtls_policy")
        .str("split_tunneling_acl_path")
        .table(
            "split_tunneling_acl",
            TableDef::set(
                "id",
                Schema::builder().req_int("id").str("dest_ip").build(),
            ),
        )
        .build(),
});
