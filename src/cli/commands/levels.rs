//! Levels command implementation.

use crate::fmt::ColorFormatter;
use crate::level::Level;
use std::process::ExitCode;

/// Handles `fanlog levels`: one line per level, lowest first, painted with `colors` if given.
#[must_use]
pub fn cmd_levels(colors: Option<&ColorFormatter>) -> ExitCode {
    for level in Level::all() {
        let label = format!("{:<8}", level.label());
        match colors {
            Some(colors) if level != Level::None => {
                println!("{} {}{label}{}", level.rank(), colors.start(level), colors.reset());
            }
            _ => println!("{} {label}", level.rank()),
        }
    }
    ExitCode::SUCCESS
}
