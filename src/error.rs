//! Error types for pidlock.
//!
//! Uses thiserror for derive macros. Every lock-related variant names the lock
//! path so messages stay actionable when several locks are in play.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for pidlock operations.
///
/// Variants fall into two families: errors raised while acquiring a lock
/// (see [`PidLockError::is_lock_error`]) and errors raised while releasing
/// one (see [`PidLockError::is_unlock_error`]).
#[derive(Error, Debug)]
pub enum PidLockError {
    /// The lock was held and the caller asked not to wait (zero timeout).
    #[error("lock '{}' is already held", path.display())]
    AlreadyLocked { path: PathBuf },

    /// The lock stayed held for the whole timeout.
    #[error("timed out after {timeout:?} waiting for lock '{}'", path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },

    /// Creating or writing the lock file failed for a reason other than contention.
    #[error("failed to create lock file '{}': {source}", path.display())]
    LockFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Release was attempted while no lock file exists.
    #[error("lock '{}' is not held", path.display())]
    NotLocked { path: PathBuf },

    /// Release was attempted by a process that does not own the lock.
    #[error("lock '{}' is held by {}", path.display(), describe_owner(*owner))]
    NotMyLock { path: PathBuf, owner: Option<u32> },

    /// Removing the lock file failed.
    #[error("failed to remove lock file '{}': {source}", path.display())]
    Unlink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading lock file metadata failed.
    #[error("failed to inspect lock file '{}': {source}", path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Lock options could not be loaded or are invalid.
    #[error("invalid lock options: {0}")]
    Config(String),
}

impl PidLockError {
    /// Returns true for failures to acquire a lock.
    pub fn is_lock_error(&self) -> bool {
        matches!(
            self,
            PidLockError::AlreadyLocked { .. }
                | PidLockError::LockTimeout { .. }
                | PidLockError::LockFailed { .. }
        )
    }

    /// Returns true for failures to release a lock.
    pub fn is_unlock_error(&self) -> bool {
        matches!(
            self,
            PidLockError::NotLocked { .. } | PidLockError::NotMyLock { .. }
        )
    }
}

fn describe_owner(owner: Option<u32>) -> String {
    match owner {
        Some(pid) => format!("process {}", pid),
        None => "another process".to_string(),
    }
}

/// Result type alias for pidlock operations.
pub type Result<T> = std::result::Result<T, PidLockError>;
