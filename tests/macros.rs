//! Tests for the call-site capturing macros.

use fanlog::{AtomicLevel, Destination, Dispatcher, Level, LogRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct Capture {
    level: AtomicLevel,
    records: Mutex<Vec<LogRecord>>,
}

impl Destination for Capture {
    fn identifier(&self) -> &str {
        "capture"
    }

    fn level(&self) -> Level {
        self.level.get()
    }

    fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    fn process(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

fn capturing(level: Level) -> (Dispatcher, Arc<Capture>) {
    let capture = Arc::new(Capture {
        level: AtomicLevel::new(level),
        records: Mutex::new(Vec::new()),
    });
    let dispatcher = Dispatcher::new("macros");
    dispatcher.add_destination(Arc::clone(&capture) as Arc<dyn Destination>);
    (dispatcher, capture)
}

#[test]
fn macro_formats_and_records_call_site() {
    let (logger, capture) = capturing(Level::Debug);
    let count = 3;

    let line = line!() + 1;
    fanlog::info!(logger: &logger, "retry {count} of {}", 5);

    let record = capture.records.lock().unwrap()[0].clone();
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.message, "retry 3 of 5");
    assert_eq!(record.function, "macro_formats_and_records_call_site");
    assert!(record.file.ends_with("macros.rs"));
    assert_eq!(record.line, line);
}

#[test]
fn function_name_inside_closure() {
    let (logger, capture) = capturing(Level::Debug);

    let run = || fanlog::warning!(logger: &logger, "inside");
    run();

    let record = capture.records.lock().unwrap()[0].clone();
    assert_eq!(record.function, "function_name_inside_closure");
}

#[test]
fn arguments_not_evaluated_when_filtered() {
    let (logger, capture) = capturing(Level::Error);
    let evaluated = AtomicUsize::new(0);
    let expensive = || {
        evaluated.fetch_add(1, Ordering::SeqCst);
        "costly"
    };

    fanlog::debug!(logger: &logger, "{}", expensive());
    fanlog::verbose!(logger: &logger, "{}", expensive());
    fanlog::error!(logger: &logger, "{}", expensive());

    assert_eq!(evaluated.load(Ordering::SeqCst), 1);
    assert_eq!(capture.records.lock().unwrap().len(), 1);
}

#[test]
fn every_level_macro() {
    let (logger, capture) = capturing(Level::Verbose);

    fanlog::verbose!(logger: &logger, "v");
    fanlog::debug!(logger: &logger, "d");
    fanlog::info!(logger: &logger, "i");
    fanlog::warning!(logger: &logger, "w");
    fanlog::error!(logger: &logger, "e");
    fanlog::severe!(logger: &logger, "s");
    fanlog::log!(logger: &logger, Level::Info, "explicit");

    let levels: Vec<Level> = capture
        .records
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.level)
        .collect();
    assert_eq!(
        levels,
        vec![
            Level::Verbose,
            Level::Debug,
            Level::Info,
            Level::Warning,
            Level::Error,
            Level::Severe,
            Level::Info,
        ]
    );
}

#[test]
fn message_less_form_uses_no_message_producer() {
    let (logger, capture) = capturing(Level::Debug);
    logger.set_no_message(|| Some("reached".to_string()));

    fanlog::info!(logger: &logger);

    let record = capture.records.lock().unwrap()[0].clone();
    assert_eq!(record.message, "reached");
    assert_eq!(record.function, "message_less_form_uses_no_message_producer");
}

#[test]
fn exec_macro_respects_dispatcher_threshold() {
    let (logger, _capture) = capturing(Level::Verbose);
    logger.set_level(Level::Warning);
    let mut ran = Vec::new();

    fanlog::exec!(logger: &logger, Level::Info, { ran.push("info") });
    fanlog::exec!(logger: &logger, Level::Error, { ran.push("error") });

    assert_eq!(ran, vec!["error"]);
}

#[test]
fn global_form_compiles_against_global_dispatcher() {
    // Severe to the global console sink; only checks the macro expansion path.
    fanlog::severe!("global {}", 1);
    fanlog::exec!(Level::Verbose, {});
    assert_eq!(Dispatcher::global().identifier(), "fanlog.default");
}
