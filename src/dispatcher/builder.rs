//! Stepwise construction of a dispatcher with its sinks already registered.
//!
//! Console and file sinks get dedicated sub-builders; each ends with `done()`, which hands
//! control back to the parent. Files are opened in [`DispatcherBuilder::build`], the only
//! step that can fail.

use super::{AppDetails, Dispatcher, NoMessage, colors_from_env};
use crate::destination::{ConsoleSink, ConsoleStream, Destination, FileSink};
use crate::fmt::{ColorSpec, ColorStyle, LineFormat};
use crate::internal;
use crate::level::Level;
use std::sync::{Arc, PoisonError};

enum Pending {
    Ready(Arc<dyn Destination>),
    Console(ConsoleSpec),
    File(FileSpec),
}

struct ConsoleSpec {
    identifier: Option<String>,
    level: Option<Level>,
    stream: ConsoleStream,
    colors: Option<bool>,
    format: LineFormat,
}

struct FileSpec {
    identifier: Option<String>,
    level: Option<Level>,
    target: String,
    format: LineFormat,
}

pub struct DispatcherBuilder {
    identifier: String,
    level: Level,
    colors: Option<bool>,
    no_message: Option<NoMessage>,
    app: Option<AppDetails>,
    destinations: Vec<Pending>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// Identifier `fanlog`, threshold `Debug`, colors from the environment, no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identifier: "fanlog".to_string(),
            level: Level::Debug,
            colors: None,
            no_message: None,
            app: None,
            destinations: Vec::new(),
        }
    }

    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Dispatcher threshold, also the starting threshold of sinks built here without one.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Overrides the `XcodeColors` environment signal.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors = Some(enabled);
        self
    }

    #[must_use]
    pub fn no_message(
        mut self,
        producer: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.no_message = Some(Arc::new(producer));
        self
    }

    #[must_use]
    pub fn app_details(mut self, details: AppDetails) -> Self {
        self.app = Some(details);
        self
    }

    /// Registers an already built sink as-is, threshold included.
    #[must_use]
    pub fn destination(mut self, destination: Arc<dyn Destination>) -> Self {
        self.destinations.push(Pending::Ready(destination));
        self
    }

    #[must_use]
    pub fn console(self) -> ConsoleBuilder {
        ConsoleBuilder {
            parent: self,
            spec: ConsoleSpec {
                identifier: None,
                level: None,
                stream: ConsoleStream::Stdout,
                colors: None,
                format: LineFormat::default(),
            },
        }
    }

    /// `target` is a path, `~/...` path or `file://` URL.
    #[must_use]
    pub fn file(self, target: impl Into<String>) -> FileBuilder {
        FileBuilder {
            parent: self,
            spec: FileSpec {
                identifier: None,
                level: None,
                target: target.into(),
                format: LineFormat::default(),
            },
        }
    }

    /// Opens files and registers every sink in the order they were added.
    ///
    /// # Errors
    /// Fails if a file cannot be opened or two sinks share an identifier.
    pub fn build(self) -> Result<Dispatcher, crate::Error> {
        let colors = self.colors.unwrap_or_else(colors_from_env);
        let dispatcher = Dispatcher::with_colors(self.identifier, colors);
        dispatcher.level.set(self.level);

        if let Some(producer) = self.no_message {
            *dispatcher
                .no_message
                .write()
                .unwrap_or_else(PoisonError::into_inner) = producer;
        }
        if let Some(app) = self.app {
            dispatcher.set_app_details(app);
        }

        for pending in self.destinations {
            let destination: Arc<dyn Destination> = match pending {
                Pending::Ready(destination) => destination,
                Pending::Console(spec) => {
                    let identifier = spec
                        .identifier
                        .unwrap_or_else(|| format!("{}.console", dispatcher.identifier));
                    let format = LineFormat {
                        colors_enabled: spec.colors.unwrap_or(colors),
                        ..spec.format
                    };
                    Arc::new(
                        ConsoleSink::new(identifier)
                            .stream(spec.stream)
                            .level(spec.level.unwrap_or(self.level))
                            .line_format(format),
                    )
                }
                Pending::File(spec) => {
                    let identifier = spec
                        .identifier
                        .unwrap_or_else(|| format!("{}.file", dispatcher.identifier));
                    // Checked before opening, which truncates the target.
                    if dispatcher.destination(&identifier).is_some() {
                        return Err(crate::Error::DuplicateDestination(identifier));
                    }
                    Arc::new(
                        FileSink::open(identifier, &spec.target)?
                            .level(spec.level.unwrap_or(self.level))
                            .line_format(spec.format),
                    )
                }
            };

            if !dispatcher.add_destination(Arc::clone(&destination)) {
                return Err(crate::Error::DuplicateDestination(
                    destination.identifier().to_string(),
                ));
            }
        }

        internal::debug(
            "DISPATCHER",
            &format!(
                "{}: built with [{}]",
                dispatcher.identifier,
                dispatcher.identifiers().join(", ")
            ),
        );
        Ok(dispatcher)
    }
}

/// Console-specific settings.
pub struct ConsoleBuilder {
    parent: DispatcherBuilder,
    spec: ConsoleSpec,
}

impl ConsoleBuilder {
    /// Defaults to `<dispatcher>.console`.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.spec.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.spec.level = Some(level);
        self
    }

    #[must_use]
    pub fn stream(mut self, stream: ConsoleStream) -> Self {
        self.spec.stream = stream;
        self
    }

    /// Overrides the dispatcher-wide color default for this sink.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.spec.colors = Some(enabled);
        self
    }

    #[must_use]
    pub const fn color_style(mut self, style: ColorStyle) -> Self {
        self.spec.format.colors.set_style(style);
        self
    }

    #[must_use]
    pub fn level_color(mut self, level: Level, spec: ColorSpec) -> Self {
        self.spec.format.colors.set(level, spec);
        self
    }

    /// Replaces the whole layout, colors flag excepted.
    #[must_use]
    pub fn line_format(mut self, format: LineFormat) -> Self {
        self.spec.format = format;
        self
    }

    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.spec.format.date_format = format.into();
        self
    }

    #[must_use]
    pub const fn show_date(mut self, show: bool) -> Self {
        self.spec.format.show_date = show;
        self
    }

    #[must_use]
    pub const fn show_level(mut self, show: bool) -> Self {
        self.spec.format.show_level = show;
        self
    }

    #[must_use]
    pub const fn show_file_name(mut self, show: bool) -> Self {
        self.spec.format.show_file_name = show;
        self
    }

    #[must_use]
    pub const fn show_line_number(mut self, show: bool) -> Self {
        self.spec.format.show_line_number = show;
        self
    }

    #[must_use]
    pub const fn show_function_name(mut self, show: bool) -> Self {
        self.spec.format.show_function_name = show;
        self
    }

    #[must_use]
    pub const fn show_thread_name(mut self, show: bool) -> Self {
        self.spec.format.show_thread_name = show;
        self
    }

    #[must_use]
    pub const fn show_identifier(mut self, show: bool) -> Self {
        self.spec.format.show_identifier = show;
        self
    }

    #[must_use]
    pub fn done(mut self) -> DispatcherBuilder {
        self.parent.destinations.push(Pending::Console(self.spec));
        self.parent
    }
}

/// File-specific settings. Colors stay off unless asked for.
pub struct FileBuilder {
    parent: DispatcherBuilder,
    spec: FileSpec,
}

impl FileBuilder {
    /// Defaults to `<dispatcher>.file`.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.spec.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.spec.level = Some(level);
        self
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.spec.format.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn line_format(mut self, format: LineFormat) -> Self {
        self.spec.format = format;
        self
    }

    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.spec.format.date_format = format.into();
        self
    }

    #[must_use]
    pub const fn show_date(mut self, show: bool) -> Self {
        self.spec.format.show_date = show;
        self
    }

    #[must_use]
    pub const fn show_level(mut self, show: bool) -> Self {
        self.spec.format.show_level = show;
        self
    }

    #[must_use]
    pub const fn show_file_name(mut self, show: bool) -> Self {
        self.spec.format.show_file_name = show;
        self
    }

    #[must_use]
    pub const fn show_line_number(mut self, show: bool) -> Self {
        self.spec.format.show_line_number = show;
        self
    }

    #[must_use]
    pub const fn show_function_name(mut self, show: bool) -> Self {
        self.spec.format.show_function_name = show;
        self
    }

    #[must_use]
    pub const fn show_thread_name(mut self, show: bool) -> Self {
        self.spec.format.show_thread_name = show;
        self
    }

    #[must_use]
    pub const fn show_identifier(mut self, show: bool) -> Self {
        self.spec.format.show_identifier = show;
        self
    }

    #[must_use]
    pub fn done(mut self) -> DispatcherBuilder {
        self.parent.destinations.push(Pending::File(self.spec));
        self.parent
    }
}
