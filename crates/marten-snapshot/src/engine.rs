//! Capability surface of the external collaborators.
//!
//! The coordinator never reaches into the storage engine's internals; it
//! drives the engine through its native config-string interface. The
//! traits here are the seam: the storage engine and test mocks implement
//! them, the coordinator consumes them.

use marten_error::Result;
use marten_types::Timestamp;

// ---------------------------------------------------------------------------
// Engine traits
// ---------------------------------------------------------------------------

/// A session on the underlying transactional engine.
///
/// The coordinator owns one session for snapshot administration and
/// serializes access to it behind its lock; begin-transaction operations
/// act on a session supplied by the caller.
pub trait EngineSession: Send {
    /// Start a transaction pinned to the point named by `config`
    /// (`snapshot=<id>` or `read_timestamp=<hex>`).
    fn begin_transaction(&self, config: &str) -> Result<()>;

    /// Pin a named point (`name=<id>`).
    fn create_snapshot(&self, config: &str) -> Result<()>;

    /// Discard pinned points (`drop=(before=<id>)` or `drop=(all)`).
    fn drop_snapshots(&self, config: &str) -> Result<()>;

    /// Release the session. Called exactly once, at coordinator shutdown;
    /// the session must not be used afterward.
    fn close(&mut self) -> Result<()>;
}

/// Process-wide engine connection, used only to push the retention floor.
///
/// Owned by the broader storage subsystem, shared with the coordinator.
pub trait EngineConnection: Send + Sync {
    /// Advance the engine's retention floor (`oldest_timestamp=<hex>`).
    /// Versions older than the floor may be discarded at any time.
    fn set_oldest_retained_timestamp(&self, config: &str) -> Result<()>;
}

/// Source of the "all durably applied up to" timestamp.
pub trait ReplicationSource {
    /// The newest point guaranteed durably applied across the replication
    /// group. May block waiting on replication progress, so the
    /// coordinator consults it before taking its lock.
    fn oplog_read_timestamp(&self) -> Timestamp;
}

/// The caller's transaction context, readied before a snapshot point is
/// taken.
pub trait TransactionContext {
    /// Flush pending transactional state so that a snapshot taken now
    /// observes a consistent view.
    fn prepare_for_snapshot(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Test mocks
// ---------------------------------------------------------------------------
