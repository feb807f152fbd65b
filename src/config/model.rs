//! LockOptions struct definition and default implementation.

use serde::{Deserialize, Serialize};

/// Options governing lock acquisition.
///
/// The timeout is tri-state: absent means wait forever, `0` means try once
/// and fail immediately on contention, and a positive value bounds the wait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOptions {
    /// Default timeout in milliseconds used by `PidLock::lock`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Delay between attempts while the lock is contended.
    ///
    /// When unset, the delay is 100ms, or a tenth of the timeout when a
    /// positive timeout is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,

    /// Create missing parent directories of the lock path before acquiring.
    pub create_parent_dirs: bool,
}
