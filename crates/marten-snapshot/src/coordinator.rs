//! The snapshot & timestamp coordinator.
//!
//! Tracks the majority-committed read point and the retention floor, and
//! enforces that the committed point only ever advances. New transactions
//! get their read point from here; stale engine-side pinned snapshots are
//! cleaned up from here.
//!
//! One mutex guards the committed snapshot, the retention floor, and the
//! administrative engine session. Every operation holds the lock for its
//! full critical section, so concurrent advances are linearized and a
//! reader always observes a committed/retained pair that was written
//! together. The only external call made outside the lock is the
//! replication-source fetch in [`SnapshotCoordinator::begin_transaction_on_oplog`],
//! which may block for an unbounded time.

use std::sync::Arc;

use parking_lot::Mutex;

use marten_error::{MartenError, Result};
use marten_types::{SnapshotId, Timestamp};

use crate::config;
use crate::engine::{EngineConnection, EngineSession, ReplicationSource, TransactionContext};

// ---------------------------------------------------------------------------
// CleanupResult
// ---------------------------------------------------------------------------

/// Result of a single [`SnapshotCoordinator::cleanup_unneeded_snapshots`]
/// pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// The cutoff below which pinned snapshots were dropped, or `None`
    /// when no committed snapshot exists yet and nothing was issued.
    pub dropped_before: Option<SnapshotId>,
}

// ---------------------------------------------------------------------------
// SnapshotCoordinator
// ---------------------------------------------------------------------------

struct Inner {
    /// Most recent snapshot confirmed visible to majority-committed reads.
    /// Never decreases outside [`SnapshotCoordinator::drop_all_snapshots`].
    committed_snapshot: Option<SnapshotId>,
    /// Retention floor last pushed to the engine; always the timestamp
    /// that was paired with `committed_snapshot`.
    oldest_kept_timestamp: Timestamp,
    /// Administrative session; `None` once shutdown has run.
    session: Option<Box<dyn EngineSession>>,
}

/// Coordinates which point-in-time snapshot is the current
/// majority-committed read point.
///
/// Constructed once at storage-engine startup and shared by reference with
/// every subsystem that begins transactions or advances the committed
/// point.
pub struct SnapshotCoordinator {
    inner: Mutex<Inner>,
    conn: Arc<dyn EngineConnection>,
}

/// Abort on an administrative engine failure.
///
/// A well-formed administrative call must succeed; a failure here leaves
/// the engine in a state this layer cannot reason about, so execution
/// must not continue.
fn engine_ok(result: Result<()>, op: &str) {
    if let Err(err) = result {
        panic!("engine {op} failed: {err}");
    }
}

impl SnapshotCoordinator {
    /// Create a coordinator owning `session` for snapshot administration.
    ///
    /// No snapshot is committed initially and the retention floor starts
    /// at [`Timestamp::ZERO`].
    #[must_use]
    pub fn new(session: Box<dyn EngineSession>, conn: Arc<dyn EngineConnection>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                committed_snapshot: None,
                oldest_kept_timestamp: Timestamp::ZERO,
                session: Some(session),
            }),
            conn,
        }
    }

    // -----------------------------------------------------------------------
    // Snapshot lifecycle
    // -----------------------------------------------------------------------

    /// Ready the caller's transaction context for a snapshot point.
    ///
    /// Surfaces whatever the context reports; no coordinator state is
    /// touched and no lock is taken.
    ///
    /// # Errors
    ///
    /// Whatever `txn` reports from flushing its pending state.
    pub fn prepare_for_create_snapshot(&self, txn: &mut dyn TransactionContext) -> Result<()> {
        txn.prepare_for_snapshot()
    }

    /// Pin `id` as a named point in the engine.
    ///
    /// # Errors
    ///
    /// The engine's verdict is returned verbatim; whether to retry is the
    /// caller's decision.
    pub fn create_snapshot(&self, id: SnapshotId) -> Result<()> {
        let mut inner = self.inner.lock();
        admin_session(&mut inner).create_snapshot(&config::snapshot_name(id))
    }

    /// Drop every pinned snapshot strictly older than the committed one.
    ///
    /// No-op until a committed snapshot exists. Intended to run
    /// periodically (see [`crate::ticker::CleanupTicker`]); a pass with
    /// nothing to clean is also a no-op on the engine side.
    pub fn cleanup_unneeded_snapshots(&self) -> CleanupResult {
        let mut inner = self.inner.lock();
        let Some(committed) = inner.committed_snapshot else {
            return CleanupResult {
                dropped_before: None,
            };
        };
        engine_ok(
            admin_session(&mut inner).drop_snapshots(&config::drop_before(committed)),
            "drop_snapshots(before)",
        );
        CleanupResult {
            dropped_before: Some(committed),
        }
    }

    /// Administrative full reset: forget the committed snapshot and drop
    /// every pinned point in the engine.
    ///
    /// Reserved for recovery/rollback paths. Any reader still relying on
    /// the prior committed point loses the never-regress guarantee; a
    /// subsequent [`Self::set_committed_snapshot`] may establish a lower
    /// point than the one dropped here.
    pub fn drop_all_snapshots(&self) {
        let mut inner = self.inner.lock();
        inner.committed_snapshot = None;
        engine_ok(
            admin_session(&mut inner).drop_snapshots(config::DROP_ALL),
            "drop_snapshots(all)",
        );
        tracing::info!("dropped all pinned snapshots");
    }

    // -----------------------------------------------------------------------
    // Timestamp retention
    // -----------------------------------------------------------------------

    /// Advance the committed snapshot to `id` and the retention floor to
    /// `ts`, in one critical section.
    ///
    /// The pairing is the consistency contract: a reader can never be
    /// handed a committed point whose underlying versions the engine has
    /// already been told it may discard.
    ///
    /// # Panics
    ///
    /// Panics if `id` is older than the current committed snapshot: the
    /// committed point never regresses, so an older `id` here is an
    /// upstream bug. No state is mutated on that path. Also panics if the
    /// engine rejects the retention-floor update.
    pub fn set_committed_snapshot(&self, id: SnapshotId, ts: Timestamp) {
        let mut inner = self.inner.lock();
        if let Some(current) = inner.committed_snapshot {
            assert!(
                current <= id,
                "committed snapshot regressed: {current} -> {id}"
            );
        }
        inner.committed_snapshot = Some(id);

        let cfg = config::oldest_timestamp(ts);
        engine_ok(
            self.conn.set_oldest_retained_timestamp(&cfg),
            "set_oldest_retained_timestamp",
        );
        inner.oldest_kept_timestamp = ts;
        tracing::debug!(%id, config = %cfg, "committed snapshot advanced");
    }

    /// The latest point guaranteed visible to majority-committed reads
    /// (the minimum snapshot a new committed read should begin on), or
    /// `None` until one is established.
    #[must_use]
    pub fn committed_snapshot(&self) -> Option<SnapshotId> {
        self.inner.lock().committed_snapshot
    }

    /// Current retention floor: the timestamp below which the engine may
    /// discard historical versions.
    #[must_use]
    pub fn oldest_kept_timestamp(&self) -> Timestamp {
        self.inner.lock().oldest_kept_timestamp
    }

    // -----------------------------------------------------------------------
    // Read timestamp selection
    // -----------------------------------------------------------------------

    /// Begin a transaction on the caller's `session`, pinned to the
    /// committed snapshot.
    ///
    /// Returns the snapshot id used, so the caller can later compare it
    /// against a possibly-advanced committed point to detect staleness.
    ///
    /// # Errors
    ///
    /// [`MartenError::CommittedSnapshotUnavailable`] until a committed
    /// snapshot is established; expected and retryable.
    ///
    /// # Panics
    ///
    /// Panics if the engine rejects the begin call: the config is well
    /// formed by construction, so a rejection is an engine fault.
    pub fn begin_transaction_on_committed_snapshot(
        &self,
        session: &dyn EngineSession,
    ) -> Result<SnapshotId> {
        let inner = self.inner.lock();
        let id = inner
            .committed_snapshot
            .ok_or(MartenError::CommittedSnapshotUnavailable)?;
        engine_ok(
            session.begin_transaction(&config::snapshot(id)),
            "begin_transaction(snapshot)",
        );
        Ok(id)
    }

    /// Begin a transaction on the caller's `session` at the freshest point
    /// replication allows that the engine still retains:
    /// `max(all-committed, retention floor)`.
    ///
    /// The replication source is consulted *before* the lock is taken: it
    /// may block, and unrelated readers must not queue behind it. Returns
    /// the read timestamp selected.
    ///
    /// # Panics
    ///
    /// Panics if the engine rejects the begin call; the selected timestamp
    /// is always at or above the retention floor, so a rejection is an
    /// engine fault.
    pub fn begin_transaction_on_oplog(
        &self,
        source: &dyn ReplicationSource,
        session: &dyn EngineSession,
    ) -> Timestamp {
        let all_committed = source.oplog_read_timestamp();
        let inner = self.inner.lock();
        let read_ts = all_committed.max(inner.oldest_kept_timestamp);
        engine_ok(
            session.begin_transaction(&config::read_timestamp(read_ts)),
            "begin_transaction(read_timestamp)",
        );
        read_ts
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Close the administrative session.
    ///
    /// Idempotent: the first call closes the session, later calls are
    /// no-ops. Snapshot administration is not permitted afterward.
    ///
    /// # Panics
    ///
    /// Panics if the engine fails to close the session.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        let Some(mut session) = inner.session.take() else {
            return;
        };
        engine_ok(session.close(), "session close");
    }

    /// Committed snapshot and retention floor read in one critical
    /// section, for pairing assertions in concurrency tests.
    #[cfg(test)]
    fn committed_pair(&self) -> (Option<SnapshotId>, Timestamp) {
        let inner = self.inner.lock();
        (inner.committed_snapshot, inner.oldest_kept_timestamp)
    }
}

/// The administrative session, which must still be open.
fn admin_session(inner: &mut Inner) -> &mut dyn EngineSession {
    inner
        .session
        .as_deref_mut()
        .expect("snapshot coordinator used after shutdown")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
