//! Tests for log level functionality.

use fanlog::{AtomicLevel, Level};

#[test]
fn level_ordering() {
    assert!(Level::Verbose < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warning);
    assert!(Level::Warning < Level::Error);
    assert!(Level::Error < Level::Severe);
    assert!(Level::Severe < Level::None);
}

#[test]
fn level_display_is_capitalized() {
    assert_eq!(Level::Verbose.to_string(), "Verbose");
    assert_eq!(Level::Warning.to_string(), "Warning");
    assert_eq!(Level::Severe.to_string(), "Severe");
    assert_eq!(Level::None.to_string(), "None");
}

#[test]
fn level_from_str() {
    assert_eq!("verbose".parse::<Level>().unwrap(), Level::Verbose);
    assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!(" Info ".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("fatal".parse::<Level>().unwrap(), Level::Severe);
    assert_eq!("off".parse::<Level>().unwrap(), Level::None);
}

#[test]
fn level_from_str_invalid() {
    let err = "loud".parse::<Level>().unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Debug);
}

#[test]
fn none_threshold_rejects_every_message_level() {
    let threshold = AtomicLevel::new(Level::None);
    for level in Level::all().into_iter().filter(|l| *l != Level::None) {
        assert!(!threshold.allows(level), "{level} passed a None threshold");
    }
}

#[test]
fn atomic_level_threshold_is_inclusive() {
    let threshold = AtomicLevel::new(Level::Warning);
    assert!(!threshold.allows(Level::Info));
    assert!(threshold.allows(Level::Warning));
    assert!(threshold.allows(Level::Severe));

    threshold.set(Level::Verbose);
    assert_eq!(threshold.get(), Level::Verbose);
    assert!(threshold.allows(Level::Verbose));
}
