//! Lock status and inspection types.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Observed state of a lock from the caller's point of view.
///
/// This is a snapshot: another process may change the state right after it
/// is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockStatus {
    /// No lock file exists.
    Unlocked,
    /// The lock file records the caller's PID.
    LockedByMe,
    /// The lock file exists but records another PID, or none that parses.
    LockedByOther { pid: Option<u32> },
}

impl LockStatus {
    /// Whether a lock file existed when the status was taken.
    pub fn is_locked(&self) -> bool {
        !matches!(self, LockStatus::Unlocked)
    }
}

/// Information about an existing lock file.
#[derive(Debug, Clone, Serialize)]
pub struct LockInfo {
    /// The lock file path.
    pub path: PathBuf,

    /// PID recorded in the lock file, if it parses.
    pub pid: Option<u32>,

    /// Last modification time of the lock file, if the platform reports one.
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the recorded PID is the inspecting lock's own PID.
    pub held_by_me: bool,
}

impl LockInfo {
    /// Calculate the age of the lock.
    pub fn age(&self) -> Option<Duration> {
        self.created_at
            .map(|created_at| Utc::now().signed_duration_since(created_at))
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        match self.age() {
            Some(age) => format_age(age),
            None => "unknown".to_string(),
        }
    }
}

fn format_age(age: Duration) -> String {
    let seconds = age.num_seconds();
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds.max(0))
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pid = match self.pid {
            Some(pid) => pid.to_string(),
            None => "unreadable".to_string(),
        };
        write!(
            f,
            "{} (pid: {}, age: {}{})",
            self.path.display(),
            pid,
            self.age_string(),
            if self.held_by_me { ", mine" } else { "" }
        )
    }
}
