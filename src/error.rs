//! Unified error type for configuration-time fanlog operations.
//!
//! Nothing on the logging hot path returns this type: it only surfaces while wiring sinks,
//! loading configuration, or explicitly flushing.

/// Error type for fanlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while opening, writing, or flushing a sink.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// A file target could not be turned into a usable path.
    InvalidPath(String),
    /// A destination with this identifier is already registered.
    DuplicateDestination(String),
    /// The background writer of the named sink is gone.
    QueueClosed(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidPath(s) => write!(f, "invalid path: {s}"),
            Self::DuplicateDestination(id) => write!(f, "duplicate destination: {id}"),
            Self::QueueClosed(id) => write!(f, "write queue closed for destination: {id}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
