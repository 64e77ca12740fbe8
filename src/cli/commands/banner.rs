//! Banner command implementation.

use crate::dispatcher::{AppDetails, Dispatcher};
use std::process::ExitCode;

/// Handles `fanlog banner`. Unset fields fall back to what the process can detect.
#[must_use]
pub fn cmd_banner(
    dispatcher: &Dispatcher,
    name: Option<&str>,
    version: Option<&str>,
    build: Option<&str>,
) -> ExitCode {
    let mut details = name.map_or_else(AppDetails::detect, AppDetails::new);
    if let Some(version) = version {
        details = details.version(version);
    }
    if let Some(build) = build {
        details = details.build(build);
    }
    dispatcher.set_app_details(details);
    dispatcher.log_app_details(None);
    ExitCode::SUCCESS
}
