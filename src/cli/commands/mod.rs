//! Each subcommand lives in its own file so the match in main stays thin.

mod banner;
mod levels;
mod log;

pub use banner::cmd_banner;
pub use levels::cmd_levels;
pub use log::cmd_log;
