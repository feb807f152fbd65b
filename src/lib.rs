//! pidlock: cooperative inter-process locking through PID files.
//!
//! A [`PidLock`] is held while a file exists at its path; the file records
//! the owning process's PID. Independent processes use it to make sure only
//! one of them runs a given job at a time.

pub mod config;
pub mod error;
pub mod locks;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::LockOptions;
pub use error::{PidLockError, Result};
pub use locks::{LockGuard, LockInfo, LockStatus, PidLock};
