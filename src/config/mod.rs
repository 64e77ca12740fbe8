//! TOML configuration: which sinks to build, their thresholds, layout and colors.
//!
//! Loading is separate from struct definitions so the file handling stays independent of
//! the serde schema.

mod structs;

pub use structs::{
    ColorConfig, ConsoleConfig, FileConfig, FormatConfig, GeneralConfig, InternalConfig,
};

use crate::fmt::{Color, ColorFormatter, ColorSpec, ColorStyle};
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An empty file must still produce a working dispatcher, so every section defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub internal: InternalConfig,
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Keyed by level name (`warning`, `error`, ...).
    pub colors: HashMap<String, ColorConfig>,
}

impl Config {
    /// Loads `<config dir>/fanlog/fanlog.toml`; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read, or the
    /// TOML is malformed.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Loads from an explicit path; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", path.display()),
        );
        Ok(config)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns error on TOML syntax or type mismatches.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// XDG-style location: `~/.config/fanlog/fanlog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no notion of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("fanlog").join("fanlog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Dispatcher threshold. Unknown names fall back to `Debug`.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        parse_level_or(&self.general.level, Level::Debug)
    }

    /// Threshold of fanlog's own diagnostics. Unknown names fall back to `Warning`.
    #[must_use]
    pub fn parse_internal_level(&self) -> Level {
        parse_level_or(&self.internal.level, Level::Warning)
    }

    #[must_use]
    pub fn console_level(&self) -> Level {
        self.console
            .level
            .as_deref()
            .map_or_else(|| self.parse_level(), |s| parse_level_or(s, self.parse_level()))
    }

    #[must_use]
    pub fn file_level(&self) -> Level {
        self.file
            .level
            .as_deref()
            .map_or_else(|| self.parse_level(), |s| parse_level_or(s, self.parse_level()))
    }

    /// Accepts `ansi`/`sgr`; anything else selects the `XcodeColors` dialect.
    #[must_use]
    pub fn parse_color_style(&self) -> ColorStyle {
        match self.general.color_style.to_lowercase().as_str() {
            "ansi" | "sgr" => ColorStyle::Ansi,
            _ => ColorStyle::XcodeColors,
        }
    }

    /// Stock palette with `[colors.<level>]` overrides applied.
    #[must_use]
    pub fn color_formatter(&self) -> ColorFormatter {
        let mut formatter = ColorFormatter::new(self.parse_color_style());

        for (name, color) in &self.colors {
            let Ok(level) = name.parse::<Level>() else {
                internal::warn("CONFIG", &format!("Unknown level in [colors]: {name}"));
                continue;
            };
            let spec = ColorSpec::new(
                color.fg.as_deref().map(Color::from_hex),
                color.bg.as_deref().map(Color::from_hex),
            );
            formatter.set(level, spec);
        }

        formatter
    }
}

fn parse_level_or(value: &str, fallback: Level) -> Level {
    value.parse().unwrap_or_else(|e| {
        internal::warn("CONFIG", &format!("{e}, using {fallback}"));
        fallback
    })
}
