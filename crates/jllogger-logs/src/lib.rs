//! jllogger Logs - Append-only log files under a single directory

mod writer;

pub use writer::{append_lines, LogAppender};

use jllogger_core::{LogName, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Get the file path for a log name inside `dir`
pub fn log_path(dir: &Path, name: &LogName) -> PathBuf {
    dir.join(name.file_name())
}

/// Ensure the log directory exists.
///
/// Only the last component is created; a missing parent is an error.
pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    match std::fs::create_dir(dir) {
        Ok(()) => {
            info!("Created log directory: {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}
