//! Sinks that receive dispatched records.
//!
//! Console and file sinks ship with the crate; anything else (network, in-memory capture,
//! platform log services) plugs in by implementing [`Destination`].

mod console;
mod file;
mod shared;

pub use console::{ConsoleSink, ConsoleStream};
pub use file::FileSink;
pub use shared::SinkCore;

use crate::level::Level;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Where a log call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CallSite {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Provenance of system-generated records (banners, internal messages).
    pub const EMPTY: Self = Self::new("", "", 0);

    #[must_use]
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// File and line of whoever called the `#[track_caller]` chain; the function name is not
    /// available this way and stays empty.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new("", location.file(), location.line())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.function.is_empty() && self.file.is_empty() && self.line == 0
    }
}

/// One log event. Built once per log call and shared by reference with every sink that
/// accepts it, so all of them observe identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
    /// Identifier of the dispatcher that built the record.
    pub logger: Arc<str>,
}

impl LogRecord {
    #[must_use]
    pub fn new(level: Level, message: String, site: CallSite, logger: Arc<str>) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            message,
            function: site.function,
            file: site.file,
            line: site.line,
            logger,
        }
    }

    /// A record without call-site provenance.
    #[must_use]
    pub fn system(level: Level, message: impl Into<String>, logger: Arc<str>) -> Self {
        Self::new(level, message.into(), CallSite::EMPTY, logger)
    }

    #[must_use]
    pub const fn site(&self) -> CallSite {
        CallSite::new(self.function, self.file, self.line)
    }
}

/// `Send + Sync` so one registered sink can be fed from many logging threads at once.
///
/// The dispatcher only calls [`process`](Destination::process) after checking
/// [`is_enabled_for`](Destination::is_enabled_for), so `process` must emit what it is given.
/// System records go through [`process_internal`](Destination::process_internal), which does
/// its own threshold check.
pub trait Destination: Send + Sync {
    /// Unique within one dispatcher.
    fn identifier(&self) -> &str;

    fn level(&self) -> Level;

    /// Takes effect for the next record; already emitted output is untouched.
    fn set_level(&self, level: Level);

    fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Renders and emits a record the dispatcher already filtered.
    fn process(&self, record: &LogRecord);

    /// Entry point for banner and internal records, which bypass dispatcher-side filtering.
    fn process_internal(&self, record: &LogRecord) {
        if self.is_enabled_for(record.level) {
            self.process(record);
        }
    }

    /// Waits until everything processed so far has reached the output medium.
    ///
    /// # Errors
    /// I/O errors from the underlying medium, or a vanished background writer.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("identifier", &self.identifier())
            .field("level", &self.level())
            .finish()
    }
}
