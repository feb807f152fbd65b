//! PID file primitives: exclusive create, lenient read, idempotent removal.
//!
//! According to the FHS section on PID files in `/var/run`, a PID file holds
//! the process identifier in ASCII-encoded decimal followed by a newline.
//! Readers should ignore extra whitespace, leading zeroes, a missing trailing
//! newline, and additional lines.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Mode for newly created PID files.
#[cfg(unix)]
const PIDFILE_MODE: u32 = 0o644;

/// Parse the PID from PID file content.
///
/// Only the first line is considered. Surrounding whitespace is trimmed and
/// anything that is not a base-10 integer yields `None`.
pub fn parse_pid(content: &str) -> Option<u32> {
    content.lines().next()?.trim().parse().ok()
}

/// Read the PID recorded in the named PID file.
///
/// Returns `None` if the file cannot be opened or read, or if its first line
/// is not a valid PID.
pub fn read_pid_from_pidfile<P: AsRef<Path>>(path: P) -> Option<u32> {
    let file = File::open(path.as_ref()).ok()?;

    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;

    parse_pid(&line)
}

/// Create the named PID file exclusively and write `pid` to it.
///
/// Fails with `io::ErrorKind::AlreadyExists` if the file is already present;
/// the existing file is left untouched. If writing fails after creation the
/// partial file is removed.
pub fn write_pid_to_pidfile<P: AsRef<Path>>(path: P, pid: u32) -> io::Result<()> {
    let path = path.as_ref();

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(PIDFILE_MODE);

    let mut file = options.open(path)?;

    let line = format!("{}\n", pid);
    if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }

    Ok(())
}

/// Remove the named PID file if it exists.
///
/// A missing file is already the desired state and is not an error.
pub fn remove_existing_pidfile<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
