//! Turning records into text: per-level colors and the line layout shared by all sinks.

mod color;
mod line;

pub use color::{Color, ColorFormatter, ColorSpec, ColorStyle};
pub use line::{DEFAULT_DATE_FORMAT, LineFormat, current_thread_name, file_name};
