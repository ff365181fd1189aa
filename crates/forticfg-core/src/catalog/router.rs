//! Routing objects.

use std::sync::LazyLock;

use crate::resource::{CmdbPath, ResourceDef};
use crate::schema::Schema;

/// `router static` — IPv4 static routes, keyed by sequence number.
pub static STATIC: LazyLock<ResourceDef> = LazyLock::new(|| ResourceDef {
    name: "router.static",
    path: CmdbPath::new("router", "static"),
    mkey: "seq_num",
    schema: Schema::builder()
        .int("seq_num")
        .str("status")
        .str("dst")
        .str("gateway")
        .str("device")
        .int("distance")
        .int("priority")
        .int("weight")
        .str("blackhole")
        .str("dynamic_gateway")
        .str("comment")
        .build(),
});
