//! Per-level line coloring.
//!
//! Colors arrive as plain RGB triples; converting platform color objects into triples is the
//! caller's business. Two escape dialects are supported: the `XcodeColors` dialect that the
//! `XcodeColors=YES` environment signal turns on, and 24-bit ANSI SGR for ordinary terminals.

use crate::level::Level;
use std::collections::HashMap;
use std::fmt;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (leading `#` optional). Malformed input falls back to white so a
    /// typo in config doesn't break rendering.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Self::WHITE;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        Self { r, g, b }
    }

    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const LIGHT_GREY: Self = Self::new(211, 211, 211);
    pub const DARK_GREY: Self = Self::new(169, 169, 169);
    pub const ORANGE: Self = Self::new(255, 165, 0);
    pub const DARK_GREEN: Self = Self::new(0, 128, 0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Foreground and background for one level. Either channel may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSpec {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl ColorSpec {
    #[must_use]
    pub const fn new(fg: Option<Color>, bg: Option<Color>) -> Self {
        Self { fg, bg }
    }

    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self::new(Some(color), None)
    }

    #[must_use]
    pub const fn fg_bg(fg: Color, bg: Color) -> Self {
        Self::new(Some(fg), Some(bg))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }

    pub const RED: Self = Self::fg(Color::RED);
    pub const GREEN: Self = Self::fg(Color::GREEN);
    pub const BLUE: Self = Self::fg(Color::BLUE);
    pub const BLACK: Self = Self::fg(Color::BLACK);
    pub const WHITE: Self = Self::fg(Color::WHITE);
    pub const LIGHT_GREY: Self = Self::fg(Color::LIGHT_GREY);
    pub const DARK_GREY: Self = Self::fg(Color::DARK_GREY);
    pub const ORANGE: Self = Self::fg(Color::ORANGE);
    pub const WHITE_ON_RED: Self = Self::fg_bg(Color::WHITE, Color::RED);
    pub const DARK_GREEN: Self = Self::fg(Color::DARK_GREEN);
}

/// Escape dialect used to express a [`ColorSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorStyle {
    /// `ESC[fgR,G,B;` / `ESC[bgR,G,B;` sequences understood by the `XcodeColors` console plugin.
    #[default]
    XcodeColors,
    /// 24-bit SGR sequences understood by most terminal emulators.
    Ansi,
}

impl ColorStyle {
    #[must_use]
    pub fn set_fg(self, c: Color) -> String {
        match self {
            Self::XcodeColors => format!("\x1b[fg{},{},{};", c.r, c.g, c.b),
            Self::Ansi => format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b),
        }
    }

    #[must_use]
    pub fn set_bg(self, c: Color) -> String {
        match self {
            Self::XcodeColors => format!("\x1b[bg{},{},{};", c.r, c.g, c.b),
            Self::Ansi => format!("\x1b[48;2;{};{};{}m", c.r, c.g, c.b),
        }
    }

    #[must_use]
    pub const fn reset_fg(self) -> &'static str {
        match self {
            Self::XcodeColors => "\x1b[fg;",
            Self::Ansi => "\x1b[39m",
        }
    }

    #[must_use]
    pub const fn reset_bg(self) -> &'static str {
        match self {
            Self::XcodeColors => "\x1b[bg;",
            Self::Ansi => "\x1b[49m",
        }
    }

    /// Clears both channels.
    #[must_use]
    pub const fn reset(self) -> &'static str {
        match self {
            Self::XcodeColors => "\x1b[;",
            Self::Ansi => "\x1b[0m",
        }
    }
}

/// Maps levels to color escapes for sinks that support coloring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFormatter {
    style: ColorStyle,
    colors: HashMap<Level, ColorSpec>,
}

impl Default for ColorFormatter {
    fn default() -> Self {
        Self::new(ColorStyle::default())
    }
}

impl ColorFormatter {
    /// Starts from the stock palette: grey for the chatty levels, blue info, orange warnings,
    /// red errors, white-on-red severe.
    #[must_use]
    pub fn new(style: ColorStyle) -> Self {
        let mut colors = HashMap::new();
        colors.insert(Level::Verbose, ColorSpec::LIGHT_GREY);
        colors.insert(Level::Debug, ColorSpec::DARK_GREY);
        colors.insert(Level::Info, ColorSpec::BLUE);
        colors.insert(Level::Warning, ColorSpec::ORANGE);
        colors.insert(Level::Error, ColorSpec::RED);
        colors.insert(Level::Severe, ColorSpec::WHITE_ON_RED);
        Self { style, colors }
    }

    /// No level colored; every line starts with a plain reset.
    #[must_use]
    pub fn empty(style: ColorStyle) -> Self {
        Self {
            style,
            colors: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn style(&self) -> ColorStyle {
        self.style
    }

    pub const fn set_style(&mut self, style: ColorStyle) {
        self.style = style;
    }

    /// Replaces the colors for `level`. An empty spec removes the entry.
    pub fn set(&mut self, level: Level, spec: ColorSpec) {
        if spec.is_empty() {
            self.colors.remove(&level);
        } else {
            self.colors.insert(level, spec);
        }
    }

    #[must_use]
    pub fn get(&self, level: Level) -> Option<ColorSpec> {
        self.colors.get(&level).copied()
    }

    /// Escape sequence for `spec`.
    ///
    /// An unset channel is always reset explicitly, so a line never inherits the previous
    /// line's color on the same stream.
    #[must_use]
    pub fn format(&self, spec: ColorSpec) -> String {
        if spec.is_empty() {
            return self.style.reset().to_string();
        }

        let mut out = String::new();
        match spec.fg {
            Some(c) => out.push_str(&self.style.set_fg(c)),
            None => out.push_str(self.style.reset_fg()),
        }
        match spec.bg {
            Some(c) => out.push_str(&self.style.set_bg(c)),
            None => out.push_str(self.style.reset_bg()),
        }
        out
    }

    /// Escape that opens a line at `level`.
    #[must_use]
    pub fn start(&self, level: Level) -> String {
        self.format(self.get(level).unwrap_or_default())
    }

    #[must_use]
    pub const fn reset(&self) -> &'static str {
        self.style.reset()
    }
}
