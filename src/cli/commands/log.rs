//! The most common CLI operation: emit a single line from a shell script.

use crate::destination::CallSite;
use crate::dispatcher::Dispatcher;
use crate::internal;
use crate::level::Level;
use std::process::ExitCode;

/// Words are joined with single spaces. Command-line messages carry no call site.
#[must_use]
pub fn cmd_log(dispatcher: &Dispatcher, level: Level, message: &[String]) -> ExitCode {
    if level == Level::None {
        internal::error("CLI", "'none' is a threshold, not a message level");
        return ExitCode::FAILURE;
    }
    dispatcher.log(level, CallSite::EMPTY, || message.join(" "));
    ExitCode::SUCCESS
}
