//! State every built-in sink carries: identity, threshold, and line layout.

use crate::fmt::LineFormat;
use crate::level::{AtomicLevel, Level};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Thresholds and flags are changed through `&self` while the sink is registered and
/// shared with logging threads; each change applies from the next record on.
#[derive(Debug)]
pub struct SinkCore {
    identifier: String,
    level: AtomicLevel,
    format: RwLock<LineFormat>,
    failures: AtomicU64,
}

impl SinkCore {
    #[must_use]
    pub fn new(identifier: impl Into<String>, level: Level, format: LineFormat) -> Self {
        Self {
            identifier: identifier.into(),
            level: AtomicLevel::new(level),
            format: RwLock::new(format),
            failures: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level.get()
    }

    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    /// Snapshot of the current layout.
    #[must_use]
    pub fn format(&self) -> LineFormat {
        self.format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Edits the layout in place.
    pub fn configure(&self, edit: impl FnOnce(&mut LineFormat)) {
        let mut format = self.format.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut format);
    }

    pub fn set_colors_enabled(&self, enabled: bool) {
        self.configure(|format| format.colors_enabled = enabled);
    }

    #[must_use]
    pub fn colors_enabled(&self) -> bool {
        self.format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .colors_enabled
    }

    /// Renders with the layout as it is right now.
    #[must_use]
    pub fn render(&self, record: &crate::destination::LogRecord) -> String {
        self.format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .render(record)
    }

    /// Out-of-band failure count; writes never report errors to the logging caller.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub(crate) fn record_failure(&self) -> u64 {
        self.failures.fetch_add(1, Ordering::Relaxed) + 1
    }
}
