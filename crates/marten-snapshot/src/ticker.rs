//! Periodic snapshot cleanup driver.
//!
//! Engine-side pinned snapshots accumulate between advances of the
//! committed point. Dropping the stale ones is cheap but does not need to
//! happen on every advance; [`CleanupTicker`] gates how often a
//! maintenance thread runs
//! [`SnapshotCoordinator::cleanup_unneeded_snapshots`].
//!
//! Pure policy: the caller supplies the clock, so tests never sleep.

use std::time::{Duration, Instant};

use crate::coordinator::{CleanupResult, SnapshotCoordinator};

/// Default interval between cleanup passes.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed-interval gate for snapshot cleanup.
#[derive(Debug, Clone)]
pub struct CleanupTicker {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl CleanupTicker {
    /// Create a ticker firing at most once per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns `true` if a cleanup pass is due at `now`, and updates the
    /// last-tick timestamp. The first call always fires.
    pub fn should_tick(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                true
            }
            Some(last) => {
                if now.duration_since(last) >= self.interval {
                    self.last_tick = Some(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record that a pass ran at `now` without the should-tick check.
    pub fn record_tick(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Run a cleanup pass on `coordinator` if one is due at `now`.
    ///
    /// Returns the pass result, or `None` when the interval has not
    /// elapsed yet.
    pub fn run(
        &mut self,
        coordinator: &SnapshotCoordinator,
        now: Instant,
    ) -> Option<CleanupResult> {
        if !self.should_tick(now) {
            return None;
        }
        let result = coordinator.cleanup_unneeded_snapshots();
        if let Some(cutoff) = result.dropped_before {
            tracing::debug!(%cutoff, "dropped pinned snapshots below committed point");
        }
        Some(result)
    }
}

impl Default for CleanupTicker {
    fn default() -> Self {
        Self::new(DEFAULT_CLEANUP_INTERVAL)
    }
}
