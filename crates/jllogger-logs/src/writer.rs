//! Line appender for log files

use jllogger_core::{LogName, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Appends newline-terminated lines to one log file.
///
/// The file is closed when the appender is dropped.
pub struct LogAppender {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogAppender {
    /// Open `<dir>/<name>.log` for appending, creating `dir` if needed
    pub fn open(dir: &Path, name: &LogName) -> Result<Self> {
        crate::ensure_log_dir(dir)?;

        let path = crate::log_path(dir, name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Write each line followed by `\n`, in order. Returns bytes written.
    pub fn append_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<u64> {
        let mut written = 0u64;
        for line in lines {
            let line = line.as_ref();
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\n")?;
            written += line.len() as u64 + 1;
        }
        self.writer.flush()?;

        debug!("Appended {} lines ({} bytes) to {}", lines.len(), written, self.path.display());
        Ok(written)
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Append lines to `<dir>/<name>.log` and close the file
pub fn append_lines<S: AsRef<str>>(dir: &Path, name: &LogName, lines: &[S]) -> Result<u64> {
    let mut appender = LogAppender::open(dir, name)?;
    appender.append_lines(lines)
}
