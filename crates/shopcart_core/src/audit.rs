//! Injectable audit trail for cart mutations.
//!
//! # Responsibility
//! - Receive one human-readable line per mutating cart call.
//! - Let callers choose where lines go instead of mutating a global logger.
//!
//! # Invariants
//! - Recording never fails and never panics.

use log::{warn, Level};
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `log` target used by [`LogAuditSink`].
pub const AUDIT_TARGET: &str = "shopcart::audit";

/// Destination for cart audit lines.
pub trait AuditSink {
    fn record(&self, level: Level, message: &str);

    /// Lines retained by this sink, oldest first. Forwarding sinks keep none.
    fn recorded(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Forwards audit lines to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: AUDIT_TARGET, level, "{message}");
    }
}

/// Keeps audit lines in memory as `"LEVEL message"`.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    lines: RefCell<Vec<String>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push(format!("{level} {message}"));
    }

    fn recorded(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

/// Appends audit lines (`"LEVEL message"`) to a file and reads them back.
///
/// Keeps the trail across processes, so a later run can export it.
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, level: Level, message: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{level} {message}"));
        if let Err(err) = result {
            warn!(
                "event=audit_write module=audit status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }

    fn recorded(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(err) => {
                warn!(
                    "event=audit_read module=audit status=error path={} error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }
}

impl<T: AuditSink + ?Sized> AuditSink for &T {
    fn record(&self, level: Level, message: &str) {
        (**self).record(level, message);
    }

    fn recorded(&self) -> Vec<String> {
        (**self).recorded()
    }
}

/// Fans every line out to both sinks.
impl<A: AuditSink, B: AuditSink> AuditSink for (A, B) {
    fn record(&self, level: Level, message: &str) {
        self.0.record(level, message);
        self.1.record(level, message);
    }

    fn recorded(&self) -> Vec<String> {
        let mut lines = self.0.recorded();
        lines.extend(self.1.recorded());
        lines
    }
}
