//! RAII lock guard implementation.

use super::lock::PidLock;
use crate::error::Result;
use log::warn;
use std::path::Path;

/// RAII guard for an acquired `PidLock`.
///
/// When dropped, the lock is released. If releasing fails (for instance
/// because another process broke the lock), a warning is logged but no
/// panic occurs.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard {
    lock: PidLock,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    pub(super) fn new(lock: PidLock) -> Self {
        Self {
            lock,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        self.lock.path()
    }

    /// Get the lock this guard holds.
    pub fn lock(&self) -> &PidLock {
        &self.lock
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release the lock before the guard
    /// goes out of scope, and want to handle errors explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.release()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lock.release()
        {
            warn!("failed to release lock '{}': {}", self.lock.path().display(), e);
        }
    }
}
