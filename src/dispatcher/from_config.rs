//! Dispatcher construction from fanlog config files.

use super::{Dispatcher, DispatcherBuilder};
use crate::config::Config;
use crate::destination::ConsoleStream;
use crate::internal;
use crate::level::Level;

impl Dispatcher {
    /// Loads the default config file and builds from it.
    ///
    /// # Errors
    /// Config loading errors, or a log file that cannot be opened.
    pub fn from_default_config() -> Result<Self, crate::Error> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Builds a dispatcher with the console and file sinks the config enables.
    ///
    /// When a file sink is configured, its location is announced as an internal `Info`
    /// message to every sink enabled for it, the file itself included.
    ///
    /// # Errors
    /// Returns an error if the configured log file cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        internal::debug("DISPATCHER", "Building dispatcher from config");

        let mut builder = Self::builder()
            .identifier(&config.general.identifier)
            .level(config.parse_level());
        if let Some(colors) = config.general.colors {
            builder = builder.colors(colors);
        }

        if config.console.enabled {
            builder = Self::configure_console(builder, config);
        }
        if config.file.enabled {
            builder = Self::configure_file(builder, config);
        }

        let dispatcher = builder.build()?;

        if dispatcher.destination_count() == 0 {
            internal::warn("DISPATCHER", "No destinations enabled");
        }

        if config.file.enabled {
            dispatcher.log_internal(
                Level::Info,
                &format!(
                    "fanlog writing log to: {}",
                    shellexpand::tilde(&config.file.path)
                ),
            );
        }

        Ok(dispatcher)
    }

    fn configure_console(builder: DispatcherBuilder, config: &Config) -> DispatcherBuilder {
        let stream = match config.console.stream.to_lowercase().as_str() {
            "stderr" => ConsoleStream::Stderr,
            "stdout" => ConsoleStream::Stdout,
            other => {
                internal::warn(
                    "CONFIG",
                    &format!("Unknown console stream '{other}', using stdout"),
                );
                ConsoleStream::Stdout
            }
        };

        let format = config
            .console
            .format
            .to_line_format(false, config.color_formatter());

        let mut console = builder
            .console()
            .stream(stream)
            .level(config.console_level())
            .line_format(format);
        if let Some(colors) = config.console.colors.or(config.general.colors) {
            console = console.colors(colors);
        }
        console.done()
    }

    fn configure_file(builder: DispatcherBuilder, config: &Config) -> DispatcherBuilder {
        let format = config
            .file
            .format
            .to_line_format(config.file.colors, config.color_formatter());

        builder
            .file(&config.file.path)
            .level(config.file_level())
            .line_format(format)
            .done()
    }
}
