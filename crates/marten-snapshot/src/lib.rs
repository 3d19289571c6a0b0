//! Snapshot & timestamp coordination above the marten storage engine.
//!
//! This crate tracks which point-in-time snapshot of the data is the
//! current majority-committed read point and enforces that this point
//! only ever advances. On top of that point it computes safe read
//! timestamps for new transactions and drives retention of obsolete
//! versions:
//!
//! - [`SnapshotCoordinator`]: the single shared coordinator object.
//! - [`engine`]: the capability traits the storage engine, replication
//!   timestamp source, and transaction context implement.
//! - [`config`]: the config-string encodings the engine consumes.
//! - [`CleanupTicker`]: periodic gate for dropping stale pinned snapshots.
//!
//! The storage engine itself (version storage, WAL, page-level snapshot
//! isolation) and the replication pipeline live elsewhere; this crate is
//! only the coordination policy layered on top of them.

pub mod config;
pub mod coordinator;
pub mod engine;
pub mod ticker;

pub use coordinator::{CleanupResult, SnapshotCoordinator};
pub use engine::{EngineConnection, EngineSession, ReplicationSource, TransactionContext};
pub use ticker::{CleanupTicker, DEFAULT_CLEANUP_INTERVAL};
