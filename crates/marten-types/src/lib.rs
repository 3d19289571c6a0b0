//! Foundation types for the marten snapshot coordination layer.
//!
//! [`Timestamp`] and [`SnapshotId`] are two views of the same 64-bit point
//! in the commit history: a `Timestamp` orders it, a `SnapshotId` names it
//! so the storage engine can pin the point and later reference or drop it.
//! Conversions between the two are lossless in both directions.

use std::fmt;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// Monotonically increasing position in the commit history.
///
/// May be backed by a hybrid logical clock or a WAL position; this layer
/// relies only on the total ordering. `Timestamp::ZERO` means "before any
/// commit" and is never a real commit point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Render in the form consumed by engine configuration strings:
    /// 16 lowercase hexadecimal digits, zero-padded, no prefix.
    ///
    /// The engine's config parser is bit-exact-sensitive; this is the one
    /// place a timestamp is encoded for it.
    #[must_use]
    pub fn as_config_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ts#{}", self.get())
    }
}

impl From<SnapshotId> for Timestamp {
    fn from(id: SnapshotId) -> Self {
        Self(id.get())
    }
}

// ---------------------------------------------------------------------------
// SnapshotId
// ---------------------------------------------------------------------------

/// A named point in the commit history that the storage engine can pin.
///
/// Same representation as [`Timestamp`]; the separate type keeps "a point
/// we ordered against" and "a point the engine holds by name" from being
/// mixed up at call sites. Administration config strings render the id in
/// decimal via [`SnapshotId::get`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct SnapshotId(u64);

impl SnapshotId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snap#{}", self.get())
    }
}

impl From<Timestamp> for SnapshotId {
    fn from(ts: Timestamp) -> Self {
        Self(ts.get())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
