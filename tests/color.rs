//! Tests for level coloring in both escape dialects.

use fanlog::{Color, ColorFormatter, ColorSpec, ColorStyle, Level};

#[test]
fn xcode_escapes_for_foreground_only() {
    let formatter = ColorFormatter::new(ColorStyle::XcodeColors);
    assert_eq!(
        formatter.start(Level::Warning),
        "\x1b[fg255,165,0;\x1b[bg;"
    );
    assert_eq!(formatter.reset(), "\x1b[;");
}

#[test]
fn xcode_escapes_for_foreground_and_background() {
    let formatter = ColorFormatter::new(ColorStyle::XcodeColors);
    assert_eq!(
        formatter.start(Level::Severe),
        "\x1b[fg255,255,255;\x1b[bg255,0,0;"
    );
}

#[test]
fn ansi_escapes() {
    let formatter = ColorFormatter::new(ColorStyle::Ansi);
    assert_eq!(formatter.start(Level::Error), "\x1b[38;2;255;0;0m\x1b[49m");
    assert_eq!(
        formatter.start(Level::Severe),
        "\x1b[38;2;255;255;255m\x1b[48;2;255;0;0m"
    );
    assert_eq!(formatter.reset(), "\x1b[0m");
}

#[test]
fn default_palette() {
    let formatter = ColorFormatter::default();
    assert_eq!(formatter.get(Level::Verbose), Some(ColorSpec::LIGHT_GREY));
    assert_eq!(formatter.get(Level::Debug), Some(ColorSpec::DARK_GREY));
    assert_eq!(formatter.get(Level::Info), Some(ColorSpec::BLUE));
    assert_eq!(formatter.get(Level::Warning), Some(ColorSpec::ORANGE));
    assert_eq!(formatter.get(Level::Error), Some(ColorSpec::RED));
    assert_eq!(formatter.get(Level::Severe), Some(ColorSpec::WHITE_ON_RED));
    assert_eq!(formatter.get(Level::None), None);
}

#[test]
fn uncolored_level_starts_with_full_reset() {
    let formatter = ColorFormatter::empty(ColorStyle::XcodeColors);
    assert_eq!(formatter.start(Level::Info), "\x1b[;");
}

#[test]
fn background_only_resets_foreground() {
    let mut formatter = ColorFormatter::empty(ColorStyle::XcodeColors);
    formatter.set(Level::Info, ColorSpec::new(None, Some(Color::BLACK)));
    assert_eq!(formatter.start(Level::Info), "\x1b[fg;\x1b[bg0,0,0;");
}

#[test]
fn setting_empty_spec_clears_level() {
    let mut formatter = ColorFormatter::default();
    formatter.set(Level::Info, ColorSpec::default());
    assert_eq!(formatter.get(Level::Info), None);
}

#[test]
fn hex_parsing() {
    assert_eq!(Color::from_hex("#ffa500"), Color::ORANGE);
    assert_eq!(Color::from_hex("008000"), Color::DARK_GREEN);
    assert_eq!(Color::from_hex("#nothex"), Color::WHITE);
    assert_eq!(Color::from_hex("#fff"), Color::WHITE);
    assert_eq!(Color::ORANGE.to_string(), "#ffa500");
}
