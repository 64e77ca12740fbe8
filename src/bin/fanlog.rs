//! `fanlog` command-line front end.
//!
//! Usage:
//!   fanlog log <level> <message...>   Log a message
//!   fanlog banner [--name N]          Log the application banner
//!   fanlog levels                     List severity levels
//!
//! Global flags (`--config`, `--level`, `--file`, `--no-console`, `--colors`, `--no-colors`)
//! override the config file.

use clap::Parser;
use fanlog::Dispatcher;
use fanlog::cli::{Cli, Command, build_dispatcher, cmd_banner, cmd_levels, cmd_log, load_config};
use fanlog::config::Config;
use fanlog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Diagnostics must be live before the dispatcher opens any file.
    internal::init_with_config(&config);

    match &cli.command {
        Command::Log { level, message } => {
            with_dispatcher(&cli, &config, |d| cmd_log(d, *level, message))
        }
        Command::Banner {
            name,
            app_version,
            build,
        } => with_dispatcher(&cli, &config, |d| {
            cmd_banner(d, name.as_deref(), app_version.as_deref(), build.as_deref())
        }),
        Command::Levels => {
            let colors = cli
                .colors_override()
                .or(config.general.colors)
                .unwrap_or(false)
                .then(|| config.color_formatter());
            cmd_levels(colors.as_ref())
        }
    }
}

/// Builds the shared dispatcher, runs `command`, and flushes before returning.
fn with_dispatcher(
    cli: &Cli,
    config: &Config,
    command: impl FnOnce(&Dispatcher) -> ExitCode,
) -> ExitCode {
    let dispatcher = match build_dispatcher(cli, config) {
        Ok(d) => d,
        Err(e) => {
            internal::error("CLI", &format!("Cannot build dispatcher: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let code = command(&dispatcher);

    if let Err(e) = dispatcher.flush() {
        internal::error("CLI", &format!("Flush failed: {e}"));
        return ExitCode::FAILURE;
    }
    code
}
