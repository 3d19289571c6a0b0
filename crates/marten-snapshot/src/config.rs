//! Engine config-string builders.
//!
//! The engine parses these strings bit-exactly, so every string handed to
//! it is assembled here and nowhere else. Timestamps render as fixed-width
//! hexadecimal ([`Timestamp::as_config_hex`]); snapshot names render in
//! decimal.

use marten_types::{SnapshotId, Timestamp};

/// `read_timestamp=<hex>`: pin a transaction's reads to a point in time.
#[must_use]
pub fn read_timestamp(ts: Timestamp) -> String {
    format!("read_timestamp={}", ts.as_config_hex())
}

/// `oldest_timestamp=<hex>`: advance the engine's retention floor.
#[must_use]
pub fn oldest_timestamp(ts: Timestamp) -> String {
    format!("oldest_timestamp={}", ts.as_config_hex())
}

/// `snapshot=<id>`: pin a transaction to a named snapshot.
#[must_use]
pub fn snapshot(id: SnapshotId) -> String {
    format!("snapshot={}", id.get())
}

/// `name=<id>`: pin a named point in the engine.
#[must_use]
pub fn snapshot_name(id: SnapshotId) -> String {
    format!("name={}", id.get())
}

/// `drop=(before=<id>)`: discard every pinned point strictly older than
/// `id`.
#[must_use]
pub fn drop_before(id: SnapshotId) -> String {
    format!("drop=(before={})", id.get())
}

/// `drop=(all)`: discard every pinned point.
pub const DROP_ALL: &str = "drop=(all)";
