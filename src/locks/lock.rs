//! The `PidLock` type: acquire, release, and break a PID file lock.

use super::guard::LockGuard;
use super::pidfile;
use super::types::{LockInfo, LockStatus};
use crate::config::LockOptions;
use crate::error::{PidLockError, Result};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// A lock represented by a PID file at a caller-supplied path.
///
/// The lock is held while the file exists. Mutual exclusion comes solely
/// from exclusive file creation, so the lock coordinates separate processes;
/// it offers no exclusion between threads that share a PID.
///
/// ```no_run
/// use pidlock::PidLock;
/// use std::time::Duration;
///
/// let lock = PidLock::new("/var/run/nightly-report.pid");
/// lock.acquire(Some(Duration::from_secs(5)))?;
/// // ... exclusive work ...
/// lock.release()?;
/// # Ok::<(), pidlock::PidLockError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PidLock {
    path: PathBuf,
    pid: u32,
    options: LockOptions,
}

impl PidLock {
    /// Create a lock owned by the current process.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_pid(path, std::process::id())
    }

    /// Create a lock that records `pid` as its owner.
    ///
    /// Useful when a supervisor takes a lock on behalf of another process.
    pub fn with_pid<P: Into<PathBuf>>(path: P, pid: u32) -> Self {
        Self {
            path: path.into(),
            pid,
            options: LockOptions::default(),
        }
    }

    /// Create a lock owned by the current process with the given options.
    pub fn with_options<P: Into<PathBuf>>(path: P, options: LockOptions) -> Self {
        Self {
            options,
            ..Self::new(path)
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the PID this lock writes and compares against.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get the options used when acquiring.
    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// Whether the lock file currently exists.
    pub fn is_locked(&self) -> bool {
        self.path.exists()
    }

    /// Get the PID recorded in the lock file, if any.
    pub fn read_pid(&self) -> Option<u32> {
        pidfile::read_pid_from_pidfile(&self.path)
    }

    /// Whether the lock file exists and records this lock's PID.
    pub fn i_am_locking(&self) -> bool {
        self.is_locked() && self.read_pid() == Some(self.pid)
    }

    /// Observe the lock's current state.
    pub fn status(&self) -> LockStatus {
        if !self.is_locked() {
            return LockStatus::Unlocked;
        }
        match self.read_pid() {
            Some(pid) if pid == self.pid => LockStatus::LockedByMe,
            pid => LockStatus::LockedByOther { pid },
        }
    }

    /// Inspect the lock file.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No lock file exists
    /// * `Ok(Some(LockInfo))` - The recorded PID and file timestamp
    /// * `Err(PidLockError::Inspect)` - The file metadata could not be read
    pub fn info(&self) -> Result<Option<LockInfo>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PidLockError::Inspect {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let pid = self.read_pid();
        Ok(Some(LockInfo {
            path: self.path.clone(),
            pid,
            created_at: metadata.modified().ok().map(DateTime::<Utc>::from),
            held_by_me: pid == Some(self.pid),
        }))
    }

    /// Acquire the lock.
    ///
    /// `timeout` selects how contention is handled:
    ///
    /// * `None` - retry until the lock is free
    /// * `Some(Duration::ZERO)` - try once, failing with `AlreadyLocked`
    /// * `Some(t)` - retry for up to `t`, then fail with `LockTimeout`
    ///
    /// Waiting polls at a fixed interval. Any failure to create the file
    /// other than it already existing is reported as `LockFailed` at once.
    pub fn acquire(&self, timeout: Option<Duration>) -> Result<()> {
        self.prepare_parent_dir()?;

        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let interval = self.options.poll_interval(timeout);

        loop {
            match pidfile::write_pid_to_pidfile(&self.path, self.pid) {
                Ok(()) => {
                    debug!("acquired lock {} as pid {}", self.path.display(), self.pid);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    let mut delay = interval;
                    if let Some(deadline) = deadline {
                        let now = Instant::now();
                        if now >= deadline {
                            return Err(self.contention_error(timeout));
                        }
                        delay = delay.min(deadline - now);
                    }
                    trace!(
                        "lock {} is held, retrying in {:?}",
                        self.path.display(),
                        delay
                    );
                    thread::sleep(delay);
                }
                Err(source) => {
                    return Err(PidLockError::LockFailed {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }

    /// Release the lock.
    ///
    /// Fails with `NotLocked` if no lock file exists and with `NotMyLock` if
    /// the file records a different PID.
    pub fn release(&self) -> Result<()> {
        if !self.is_locked() {
            return Err(PidLockError::NotLocked {
                path: self.path.clone(),
            });
        }
        if !self.i_am_locking() {
            return Err(PidLockError::NotMyLock {
                path: self.path.clone(),
                owner: self.read_pid(),
            });
        }

        self.remove()?;
        debug!("released lock {}", self.path.display());
        Ok(())
    }

    /// Remove the lock file regardless of which process recorded it.
    ///
    /// Breaking a lock that does not exist is a no-op. The recorded PID is
    /// not checked for liveness.
    pub fn break_lock(&self) -> Result<()> {
        if let Some(pid) = self.read_pid() {
            debug!("breaking lock {} recorded by pid {}", self.path.display(), pid);
        }
        self.remove()
    }

    /// Acquire the lock with the configured default timeout.
    ///
    /// The returned guard releases the lock when dropped.
    pub fn lock(&self) -> Result<LockGuard> {
        self.acquire(self.options.timeout())?;
        Ok(LockGuard::new(self.clone()))
    }

    /// Acquire the lock without waiting.
    pub fn try_lock(&self) -> Result<LockGuard> {
        self.acquire(Some(Duration::ZERO))?;
        Ok(LockGuard::new(self.clone()))
    }

    fn contention_error(&self, timeout: Option<Duration>) -> PidLockError {
        match timeout {
            Some(timeout) if !timeout.is_zero() => PidLockError::LockTimeout {
                path: self.path.clone(),
                timeout,
            },
            _ => PidLockError::AlreadyLocked {
                path: self.path.clone(),
            },
        }
    }

    fn prepare_parent_dir(&self) -> Result<()> {
        if !self.options.create_parent_dirs {
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|source| PidLockError::LockFailed {
                path: self.path.clone(),
                source,
            })?;
        }

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        pidfile::remove_existing_pidfile(&self.path).map_err(|source| PidLockError::Unlink {
            path: self.path.clone(),
            source,
        })
    }
}

impl std::fmt::Display for PidLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (pid {})", self.path.display(), self.pid)
    }
}
