//! PID file locking.
//!
//! A lock is held while a file exists at a well-known path. The file is
//! created with **create_new** semantics (exclusive create), so only one
//! process can acquire a given lock at a time; there is no check-then-create
//! window.
//!
//! # Lock File Format
//!
//! The file holds the owner's PID in ASCII decimal followed by a single
//! newline, e.g. `25\n`. Readers accept leading zeroes, surrounding
//! whitespace, a missing newline, and extra lines.
//!
//! # Waiting
//!
//! Contended acquisitions poll at a fixed interval rather than waiting on a
//! notification. This suits single-instance guards for long-running jobs; it
//! is not meant for heavily contended locks, and waiters are not served in
//! any particular order.
//!
//! # Stale Locks
//!
//! A process that exits without releasing leaves its lock file behind. No
//! liveness check is made on the recorded PID; use `PidLock::break_lock`
//! to recover.
//!
//! # RAII Guards
//!
//! `PidLock::lock` and `PidLock::try_lock` return a guard that releases the
//! lock when dropped.

mod guard;
mod lock;
pub mod pidfile;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use lock::PidLock;
pub use types::{LockInfo, LockStatus};
