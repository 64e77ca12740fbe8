//! Renders a record into one output line.
//!
//! Field order is fixed; flags only decide which fields appear:
//! `<date> [<Level>] [<thread>] [<logger>] [<file>:<line>] <function> <message>`.

use super::{ColorFormatter, ColorStyle};
use crate::destination::LogRecord;
use std::fmt::Write;

/// Matches `yyyy-MM-dd HH:mm:ss.SSS`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Everything a sink needs to decide what one line looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    pub show_date: bool,
    pub show_level: bool,
    pub show_file_name: bool,
    pub show_line_number: bool,
    pub show_function_name: bool,
    pub show_thread_name: bool,
    /// Renders the owning dispatcher's identifier.
    pub show_identifier: bool,
    /// chrono strftime pattern.
    pub date_format: String,
    pub colors_enabled: bool,
    pub colors: ColorFormatter,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            show_date: true,
            show_level: true,
            show_file_name: true,
            show_line_number: true,
            show_function_name: true,
            show_thread_name: false,
            show_identifier: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            colors_enabled: false,
            colors: ColorFormatter::new(ColorStyle::default()),
        }
    }
}

impl LineFormat {
    /// Only the level tag and the message. Handy for diagnostics and tests.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            show_date: false,
            show_file_name: false,
            show_line_number: false,
            show_function_name: false,
            ..Self::default()
        }
    }

    /// Produces the line without a trailing newline.
    ///
    /// Thread name is looked up on the calling thread, so sinks must render before handing
    /// work to another thread.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(record.message.len() + 64);

        if self.show_date {
            self.push_date(&mut line, record);
        }

        if self.show_level {
            push_field(&mut line, &format!("[{}]", record.level.label()));
        }

        if self.show_thread_name {
            push_field(&mut line, &format!("[{}]", current_thread_name()));
        }

        if self.show_identifier && !record.logger.is_empty() {
            push_field(&mut line, &format!("[{}]", record.logger));
        }

        let show_file = self.show_file_name && !record.file.is_empty();
        let show_line = self.show_line_number && record.line > 0;
        match (show_file, show_line) {
            (true, true) => {
                let file = file_name(record.file);
                push_field(&mut line, &format!("[{file}:{}]", record.line));
            }
            (true, false) => push_field(&mut line, &format!("[{}]", file_name(record.file))),
            (false, true) => push_field(&mut line, &format!("[{}]", record.line)),
            (false, false) => {}
        }

        if self.show_function_name && !record.function.is_empty() {
            push_field(&mut line, record.function);
        }

        if !record.message.is_empty() {
            push_field(&mut line, &record.message);
        }

        if self.colors_enabled {
            format!(
                "{}{line}{}",
                self.colors.start(record.level),
                self.colors.reset()
            )
        } else {
            line
        }
    }

    fn push_date(&self, line: &mut String, record: &LogRecord) {
        let mut date = String::new();
        // chrono reports a bad pattern as a fmt error at render time
        if write!(date, "{}", record.timestamp.format(&self.date_format)).is_err() {
            date.clear();
            let _ = write!(date, "{}", record.timestamp.format(DEFAULT_DATE_FORMAT));
        }
        push_field(line, &date);
    }
}

fn push_field(line: &mut String, field: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(field);
}

/// Last path component, for either separator.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Name of the calling thread; unnamed threads fall back to their id.
#[must_use]
pub fn current_thread_name() -> String {
    let thread = std::thread::current();
    thread
        .name()
        .map_or_else(|| format!("{:?}", thread.id()), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name("src/destination/file.rs"), "file.rs");
        assert_eq!(file_name(r"C:\work\main.rs"), "main.rs");
        assert_eq!(file_name("main.rs"), "main.rs");
        assert_eq!(file_name(""), "");
    }

    #[test]
    fn unnamed_thread_falls_back_to_id() {
        let name = std::thread::spawn(current_thread_name).join().unwrap();
        assert!(name.starts_with("ThreadId("));
    }

    #[test]
    fn named_thread_uses_its_name() {
        let name = std::thread::Builder::new()
            .name("worker-7".into())
            .spawn(current_thread_name)
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(name, "worker-7");
    }
}
