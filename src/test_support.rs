use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Run `f` with `dir` as the process working directory.
///
/// The working directory is process-global, so callers are serialized and
/// the previous directory is restored even if `f` panics.
pub(crate) fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    struct Restore(PathBuf);

    impl Drop for Restore {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    let _serialized = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
    let _restore = Restore(std::env::current_dir().unwrap());
    std::env::set_current_dir(dir).unwrap();
    f()
}

/// A scratch directory with a lock path inside it.
pub(crate) fn lock_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("job.pid");
    (temp_dir, path)
}

/// A PID that differs from the test process's own.
pub(crate) fn other_pid() -> u32 {
    std::process::id().wrapping_add(1)
}
