//! Utility functions for the CLI.

use crate::cli::Cli;
use crate::config::Config;
use crate::dispatcher::Dispatcher;

/// Loads `--config` when given, otherwise the default config file.
///
/// # Errors
/// Returns the config loading error.
pub fn load_config(cli: &Cli) -> Result<Config, crate::Error> {
    cli.config
        .as_deref()
        .map_or_else(Config::load, Config::load_from)
}

/// Folds the global flags into a copy of `config`.
#[must_use]
pub fn apply_overrides(cli: &Cli, config: &Config) -> Config {
    let mut config = config.clone();

    if let Some(level) = cli.level {
        config.general.level = level.as_str().to_string();
        config.console.level = None;
        config.file.level = None;
    }
    if let Some(path) = &cli.file {
        config.file.enabled = true;
        config.file.path.clone_from(path);
    }
    if cli.no_console {
        config.console.enabled = false;
    }
    if let Some(colors) = cli.colors_override() {
        config.general.colors = Some(colors);
        config.console.colors = Some(colors);
    }

    config
}

/// Builds the dispatcher every subcommand shares.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn build_dispatcher(cli: &Cli, config: &Config) -> Result<Dispatcher, crate::Error> {
    Dispatcher::from_config(&apply_overrides(cli, config))
}
