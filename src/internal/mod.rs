//! fanlog's own diagnostic channel: config problems, sink wiring, file write failures.
//!
//! Backed by a dedicated dispatcher with a single stderr console sink. It never holds a file
//! sink, so a failing file cannot feed back into itself. Until one of the `init` functions
//! runs, diagnostics are discarded.

use crate::config::Config;
use crate::destination::{CallSite, ConsoleSink, ConsoleStream};
use crate::dispatcher::Dispatcher;
use crate::fmt::LineFormat;
use crate::level::Level;
use std::sync::{Arc, OnceLock};

/// Identifier of the internal dispatcher.
pub const IDENTIFIER: &str = "fanlog.internal";

static INTERNAL: OnceLock<Dispatcher> = OnceLock::new();

/// Initializes from the default config file, or defaults if it can't be loaded.
///
/// Only the first `init*` call takes effect.
pub fn init() {
    if INTERNAL.get().is_none() {
        let level = Config::load().unwrap_or_default().parse_internal_level();
        init_with_level(level);
    }
}

/// Reuses an already loaded config.
pub fn init_with_config(config: &Config) {
    init_with_level(config.parse_internal_level());
}

pub fn init_with_level(level: Level) {
    let was_init = INTERNAL.get().is_some();
    INTERNAL.get_or_init(|| build_internal_dispatcher(level));
    if !was_init {
        debug("INTERNAL", &format!("Diagnostics ready at {level}"));
    }
}

/// Whether diagnostics are being recorded at all.
#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL.get().is_some()
}

fn build_internal_dispatcher(level: Level) -> Dispatcher {
    let format = LineFormat {
        show_file_name: false,
        show_line_number: false,
        show_function_name: false,
        colors_enabled: false,
        ..LineFormat::default()
    };
    let console = ConsoleSink::new(format!("{IDENTIFIER}.console"))
        .stream(ConsoleStream::Stderr)
        .level(level)
        .line_format(format);

    let dispatcher = Dispatcher::new(IDENTIFIER);
    dispatcher.set_level(level);
    dispatcher.add_destination(Arc::new(console));
    dispatcher
}

fn log(level: Level, scope: &str, msg: &str) {
    if let Some(dispatcher) = INTERNAL.get() {
        dispatcher.log(level, CallSite::EMPTY, || format!("{scope}: {msg}"));
    }
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
