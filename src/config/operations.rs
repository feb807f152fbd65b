//! LockOptions loading, validation, and duration helpers.

use super::model::LockOptions;
use crate::error::{PidLockError, Result};
use std::path::Path;
use std::time::Duration;

/// Poll interval used when waiting without a deadline.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl LockOptions {
    /// Load options from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PidLockError::Config(format!(
                "failed to read options file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options: LockOptions = serde_yaml::from_str(yaml)
            .map_err(|e| PidLockError::Config(format!("failed to parse YAML: {}", e)))?;

        options.validate()?;
        Ok(options)
    }

    /// Serialize options to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PidLockError::Config(format!("failed to serialize YAML: {}", e)))
    }

    /// Validate option values.
    ///
    /// `poll_interval_ms`, when set, must be greater than 0.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == Some(0) {
            return Err(PidLockError::Config(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the default timeout.
    ///
    /// Sub-millisecond timeouts round up, so only `Duration::ZERO` means
    /// "try once".
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_ms = timeout.map(ceil_millis);
        self
    }

    /// Set an explicit poll interval, at least 1ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = Some(ceil_millis(interval).max(1));
        self
    }

    /// Default timeout as a `Duration`; `None` waits forever.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Delay between attempts for an acquisition bounded by `timeout`.
    ///
    /// A zero `poll_interval_ms` is ignored in favour of the derived delay.
    pub fn poll_interval(&self, timeout: Option<Duration>) -> Duration {
        if let Some(ms) = self.poll_interval_ms
            && ms > 0
        {
            return Duration::from_millis(ms);
        }
        match timeout {
            Some(t) if !t.is_zero() => t / 10,
            _ => DEFAULT_POLL_INTERVAL,
        }
    }
}

fn ceil_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}
