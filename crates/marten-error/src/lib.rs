//! Error types for the marten snapshot coordination layer.
//!
//! `MartenError` covers the conditions that are surfaced to callers as
//! values: expected/retryable states and engine verdicts from best-effort
//! operations. Invariant violations (a committed-snapshot regression, an
//! administrative engine call failing) are *not* represented here; those
//! abort via `panic!` so the two failure classes stay syntactically
//! distinct and tests can assert which one fires.

use thiserror::Error;

/// Primary error type for snapshot coordination operations.
#[derive(Error, Debug)]
pub enum MartenError {
    // === Snapshot Errors ===
    /// A reader asked to begin on the majority-committed point before one
    /// has been established. Expected during startup and after a full
    /// snapshot reset; callers retry.
    #[error("committed snapshot not yet available")]
    CommittedSnapshotUnavailable,

    // === Engine Errors ===
    /// The engine temporarily cannot service the call.
    #[error("engine is busy")]
    Busy,

    /// Call on an engine session that was already closed.
    #[error("engine session is closed")]
    SessionClosed,

    /// The engine rejected a configuration string.
    #[error("engine rejected config: '{config}'")]
    InvalidConfig { config: String },

    /// File I/O error inside the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine-internal logic error.
    #[error("internal engine error: {0}")]
    Internal(String),
}

impl MartenError {
    /// Whether this is a transient condition that may succeed on retry.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::CommittedSnapshotUnavailable | Self::Busy)
    }

    /// Create an engine-internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a rejected-config error.
    pub fn invalid_config(config: impl Into<String>) -> Self {
        Self::InvalidConfig {
            config: config.into(),
        }
    }
}

/// Result type alias using `MartenError`.
pub type Result<T> = std::result::Result<T, MartenError>;
