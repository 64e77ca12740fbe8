//! Configuration struct definitions.

use crate::fmt::{ColorFormatter, DEFAULT_DATE_FORMAT, LineFormat};
use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Dispatcher identifier.
    pub identifier: String,
    /// Dispatcher threshold, and the default for sinks without their own.
    pub level: String,
    /// Color default; `None` defers to the `XcodeColors` environment variable.
    pub colors: Option<bool>,
    /// Escape dialect (`xcode`, `ansi`).
    pub color_style: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            identifier: "fanlog".to_string(),
            level: "debug".to_string(),
            colors: None,
            color_style: "xcode".to_string(),
        }
    }
}

/// Settings for fanlog's own diagnostics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InternalConfig {
    /// Threshold of the internal stderr sink.
    pub level: String,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            level: "warning".to_string(),
        }
    }
}

/// Which fields a sink renders.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    pub show_date: bool,
    pub show_level: bool,
    pub show_file_name: bool,
    pub show_line_number: bool,
    pub show_function_name: bool,
    pub show_thread_name: bool,
    pub show_identifier: bool,
    /// chrono strftime pattern.
    pub date_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        let line = LineFormat::default();
        Self {
            show_date: line.show_date,
            show_level: line.show_level,
            show_file_name: line.show_file_name,
            show_line_number: line.show_line_number,
            show_function_name: line.show_function_name,
            show_thread_name: line.show_thread_name,
            show_identifier: line.show_identifier,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl FormatConfig {
    #[must_use]
    pub fn to_line_format(&self, colors_enabled: bool, colors: ColorFormatter) -> LineFormat {
        LineFormat {
            show_date: self.show_date,
            show_level: self.show_level,
            show_file_name: self.show_file_name,
            show_line_number: self.show_line_number,
            show_function_name: self.show_function_name,
            show_thread_name: self.show_thread_name,
            show_identifier: self.show_identifier,
            date_format: self.date_format.clone(),
            colors_enabled,
            colors,
        }
    }
}

/// Console sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Enable console output.
    pub enabled: bool,
    /// `stdout` or `stderr`.
    pub stream: String,
    /// Own threshold; `None` uses `general.level`.
    pub level: Option<String>,
    /// Own color switch; `None` uses `general.colors`.
    pub colors: Option<bool>,
    #[serde(flatten)]
    pub format: FormatConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stream: "stdout".to_string(),
            level: None,
            colors: None,
            format: FormatConfig::default(),
        }
    }
}

/// File sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Enable file output.
    pub enabled: bool,
    /// Log file; truncated each time the dispatcher is built.
    pub path: String,
    /// Own threshold; `None` uses `general.level`.
    pub level: Option<String>,
    /// Escape codes in files are rarely wanted.
    pub colors: bool,
    #[serde(flatten)]
    pub format: FormatConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("", "", "fanlog").map_or_else(
            || "fanlog.log".to_string(),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("fanlog.log")
                    .to_string_lossy()
                    .into_owned()
            },
        );

        Self {
            enabled: false,
            path,
            level: None,
            colors: false,
            format: FormatConfig::default(),
        }
    }
}

/// Per-level color override, hex strings.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ColorConfig {
    pub fg: Option<String>,
    pub bg: Option<String>,
}
