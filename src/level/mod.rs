//! Severity levels shared by the dispatcher and every sink for threshold comparisons.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Totally ordered by rank, so `level >= threshold` is the whole filtering rule.
///
/// `None` is the "disabled" sentinel: a threshold of `None` lets nothing through except
/// records explicitly logged at `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// High-volume instrumentation.
    Verbose = 0,
    /// Development diagnostics.
    #[default]
    Debug = 1,
    /// Normal operational milestones.
    Info = 2,
    /// Non-fatal anomalies.
    Warning = 3,
    /// Failures of a single operation.
    Error = 4,
    /// Failures the process may not recover from.
    Severe = 5,
    /// Disables output when used as a threshold.
    None = 6,
}

impl Level {
    /// Lowercase spelling used by config files and CLI args.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Severe => "severe",
            Self::None => "none",
        }
    }

    /// Capitalized name rendered into log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Verbose => "Verbose",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Severe => "Severe",
            Self::None => "None",
        }
    }

    /// Every level in rank order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Verbose,
            Self::Debug,
            Self::Info,
            Self::Warning,
            Self::Error,
            Self::Severe,
            Self::None,
        ]
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::rank`]; out-of-range ranks saturate to `None`.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Verbose,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warning,
            4 => Self::Error,
            5 => Self::Severe,
            _ => Self::None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "trace" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "severe" | "critical" | "fatal" => Ok(Self::Severe),
            "none" | "off" => Ok(Self::None),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A threshold that can be read and replaced through `&self` from any thread.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level.rank()))
    }

    #[must_use]
    pub fn get(&self) -> Level {
        Level::from_rank(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level.rank(), Ordering::Release);
    }

    /// `level >= threshold`.
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        level >= self.get()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}
