//! Call-site capturing logging macros.
//!
//! Format arguments are evaluated inside the message producer, so nothing is formatted unless
//! at least one sink accepts the level.
//!
//! ```
//! use fanlog::{ConsoleSink, Dispatcher, Level};
//! use std::sync::Arc;
//!
//! let logger = Dispatcher::new("app");
//! logger.add_destination(Arc::new(ConsoleSink::new("app.console").level(Level::Info)));
//!
//! let attempts = 3;
//! fanlog::warning!(logger: &logger, "retrying after {attempts} attempts");
//! fanlog::debug!(logger: &logger, "{}", expensive()); // `expensive` never runs
//! # fn expensive() -> String { unreachable!() }
//! ```

/// Name of the enclosing function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __fanlog_marker() {}
        fn __fanlog_type_name<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __fanlog_type_name(__fanlog_marker);
        let name = name.strip_suffix("::__fanlog_marker").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        name.rsplit("::").next().unwrap_or(name)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {
        $crate::CallSite::new(
            $crate::__function_name!(),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Logs at an explicit level.
///
/// `log!(logger: &d, level, "fmt", args..)` targets a dispatcher; without `logger:` the
/// global dispatcher is used. Leaving out the message uses the dispatcher's no-message
/// producer.
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr) => {
        $logger.log_no_message($level, $crate::__call_site!())
    };
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::__call_site!(), || ::std::format!($($arg)+))
    };
    ($level:expr) => {
        $crate::log!(logger: $crate::Dispatcher::global(), $level)
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log!(logger: $crate::Dispatcher::global(), $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Verbose) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Verbose, $($arg)+) };
    () => { $crate::log!($crate::Level::Verbose) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Verbose, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Debug) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Debug, $($arg)+) };
    () => { $crate::log!($crate::Level::Debug) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Info) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Info, $($arg)+) };
    () => { $crate::log!($crate::Level::Info) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Warning) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Warning, $($arg)+) };
    () => { $crate::log!($crate::Level::Warning) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Error) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Error, $($arg)+) };
    () => { $crate::log!($crate::Level::Error) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! severe {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Severe) };
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Severe, $($arg)+) };
    () => { $crate::log!($crate::Level::Severe) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Severe, $($arg)+) };
}

/// Runs a block only when the dispatcher's own threshold admits `level`.
#[macro_export]
macro_rules! exec {
    (logger: $logger:expr, $level:expr, $body:block) => {
        $logger.exec($level, || $body)
    };
    ($level:expr, $body:block) => {
        $crate::Dispatcher::global().exec($level, || $body)
    };
}
