//! `fanlog` - leveled logging fanned out to console and file destinations.
//!
//! A [`Dispatcher`] owns an ordered list of [`Destination`]s, each with its own threshold.
//! A log call builds its message lazily and at most once, then hands the same record to
//! every destination that accepts the level.
//!
//! - Six severities plus a `None` threshold that silences a sink ([`Level`])
//! - Console sink with `XcodeColors` or ANSI escapes per level
//! - File sink with a background writer thread, truncated on open
//! - Builder and TOML config construction
//! - Call-site capturing macros
//!
//! # Example
//!
//! ```no_run
//! use fanlog::{Dispatcher, Level};
//!
//! let logger = Dispatcher::builder()
//!     .identifier("app")
//!     .level(Level::Debug)
//!     .console()
//!         .level(Level::Info)
//!         .colors(true)
//!         .done()
//!     .file("/tmp/app.log")
//!         .done()
//!     .build()?;
//!
//! logger.info(|| "Application started");
//! fanlog::debug!(logger: &logger, "connecting to {}", "db.local");
//! fanlog::warning!(logger: &logger, "slow response");
//! logger.flush()?;
//! # Ok::<(), fanlog::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `fanlog` command-line tool

pub mod config;
pub mod destination;
pub mod dispatcher;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod level;
mod macros;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use destination::{
    CallSite, ConsoleSink, ConsoleStream, Destination, FileSink, LogRecord, SinkCore,
};
pub use dispatcher::{AppDetails, Dispatcher, DispatcherBuilder, IntoMessage};
pub use error::Error;
pub use fmt::{Color, ColorFormatter, ColorSpec, ColorStyle, LineFormat};
pub use level::{AtomicLevel, Level};
