//! Console sink: renders inline on the logging thread and writes one line per record, so
//! output keeps its order relative to other synchronous writes on the same stream.

use super::{Destination, LogRecord, SinkCore};
use crate::fmt::{ColorStyle, LineFormat};
use crate::level::Level;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Stream a [`ConsoleSink`] writes to.
#[derive(Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
    /// Any other writer, e.g. an in-memory buffer or a host-provided pipe.
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl ConsoleStream {
    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::Writer(Mutex::new(Box::new(writer)))
    }

    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().write_all(line),
            Self::Stderr => io::stderr().lock().write_all(line),
            Self::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_all(line),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Stderr => io::stderr().flush(),
            Self::Writer(writer) => writer.lock().unwrap_or_else(PoisonError::into_inner).flush(),
        }
    }
}

impl fmt::Debug for ConsoleStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Writes formatted, optionally colorized lines to a console stream.
#[derive(Debug)]
pub struct ConsoleSink {
    core: SinkCore,
    stream: ConsoleStream,
}

impl ConsoleSink {
    /// Stdout, threshold `Debug`, default layout, colors off.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            core: SinkCore::new(identifier, Level::Debug, LineFormat::default()),
            stream: ConsoleStream::Stdout,
        }
    }

    #[must_use]
    pub fn stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    #[must_use]
    pub fn level(self, level: Level) -> Self {
        self.core.set_level(level);
        self
    }

    #[must_use]
    pub fn line_format(self, format: LineFormat) -> Self {
        self.core.configure(|current| *current = format);
        self
    }

    #[must_use]
    pub fn colors(self, enabled: bool) -> Self {
        self.core.set_colors_enabled(enabled);
        self
    }

    #[must_use]
    pub fn color_style(self, style: ColorStyle) -> Self {
        self.core.configure(|format| format.colors.set_style(style));
        self
    }

    /// Runtime access to threshold, layout and failure count.
    #[must_use]
    pub const fn core(&self) -> &SinkCore {
        &self.core
    }

    /// Lines that could not be written.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.core.write_failures()
    }
}

impl Destination for ConsoleSink {
    fn identifier(&self) -> &str {
        self.core.identifier()
    }

    fn level(&self) -> Level {
        self.core.level()
    }

    fn set_level(&self, level: Level) {
        self.core.set_level(level);
    }

    fn process(&self, record: &LogRecord) {
        let mut line = self.core.render(record);
        line.push('\n');

        // Only counted: the internal logger may itself be a console sink.
        if self.stream.write_line(line.as_bytes()).is_err() {
            self.core.record_failure();
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.stream.flush()?;
        Ok(())
    }
}
