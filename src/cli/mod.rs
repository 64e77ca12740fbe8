//! CLI module for fanlog.
//!
//! This module provides the command-line interface using Clap.

pub mod commands;
pub mod util;

use crate::level::Level;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fanlog - Log messages to console and file destinations from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "fanlog",
    version,
    about = "Log messages to console and file destinations"
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/fanlog/fanlog.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Dispatcher threshold, applied to every destination
    #[arg(long, global = true, value_name = "LEVEL")]
    pub level: Option<Level>,
    /// Also write to this file (truncated first)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<String>,
    /// Disable the console destination
    #[arg(long, global = true)]
    pub no_console: bool,
    /// Force colored output
    #[arg(long, global = true, overrides_with = "no_colors")]
    pub colors: bool,
    /// Force plain output
    #[arg(long, global = true, overrides_with = "colors")]
    pub no_colors: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// `Some` only when one of the color flags was given.
    #[must_use]
    pub const fn colors_override(&self) -> Option<bool> {
        if self.colors {
            Some(true)
        } else if self.no_colors {
            Some(false)
        } else {
            None
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a message.
    Log {
        /// Severity (verbose, debug, info, warning, error, severe)
        level: Level,
        /// Log message
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Log the application banner.
    Banner {
        /// Application name (defaults to the executable name)
        #[arg(long)]
        name: Option<String>,
        /// Application version
        #[arg(long)]
        app_version: Option<String>,
        /// Application build
        #[arg(long)]
        build: Option<String>,
    },
    /// List severity levels in threshold order.
    Levels,
}

pub use commands::{cmd_banner, cmd_levels, cmd_log};
pub use util::{apply_overrides, build_dispatcher, load_config};
