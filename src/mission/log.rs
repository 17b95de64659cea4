//! Mission log sinks
//!
//! The mission only needs to append a line; where it goes is up to the sink.
//! Every sink remembers the last line so the driver can show it.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Result;

/// Destination for mission log lines
pub trait LogSink: Send {
    /// Record one message. Sinks stamp the time themselves.
    fn append(&mut self, message: &str);

    /// Most recent message, if any
    fn last(&self) -> Option<&str>;
}

/// Keeps only the last line
#[derive(Debug, Default)]
pub struct MemoryLog {
    last: Option<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, message: &str) {
        self.last = Some(message.to_string());
    }

    fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Forwards lines to `tracing` and nowhere else
#[derive(Debug, Default)]
pub struct TracingLog {
    last: Option<String>,
}

impl TracingLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for TracingLog {
    fn append(&mut self, message: &str) {
        tracing::info!(target: "minefield::mission_log", "{}", message);
        self.last = Some(message.to_string());
    }

    fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Appends `<timestamp> <message>` lines to a file
pub struct FileLog {
    path: PathBuf,
    writer: LineWriter<File>,
    last: Option<String>,
}

impl FileLog {
    /// Open (or create) a log file for appending
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: LineWriter::new(file),
            last: None,
        })
    }

    /// Create `log_<date>_<time>.log` inside `dir`
    pub fn create_in(dir: &Path) -> Result<Self> {
        let name = format!("log_{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S"));
        Self::open(&dir.join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLog {
    fn append(&mut self, message: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        if let Err(e) = writeln!(self.writer, "{} {}", stamp, message) {
            tracing::warn!("Failed to write mission log {:?}: {}", self.path, e);
        }
        self.last = Some(message.to_string());
    }

    fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
