//! Startup banner: who is running, which fanlog, at what threshold.

use super::Dispatcher;
use crate::destination::{Destination, LogRecord};
use crate::level::Level;
use chrono::Local;
use std::sync::{Arc, PoisonError};

/// Identity of the host process as shown in the banner.
///
/// fanlog cannot see the host's package metadata, so version and build are whatever the
/// host supplies through [`Dispatcher::set_app_details`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppDetails {
    pub name: String,
    pub version: Option<String>,
    pub build: Option<String>,
}

impl AppDetails {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            build: None,
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Name from the running executable, falling back to `argv[0]`.
    #[must_use]
    pub fn detect() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .or_else(|| std::env::args().next())
            .unwrap_or_else(|| "unknown".to_string());
        Self::new(name)
    }

    /// `<name> [Version: <v> ][Build: <b> ]PID: <pid>`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!("{} ", self.name);
        if let Some(version) = &self.version {
            line.push_str(&format!("Version: {version} "));
        }
        if let Some(build) = &self.build {
            line.push_str(&format!("Build: {build} "));
        }
        line.push_str(&format!("PID: {}", std::process::id()));
        line
    }
}

impl Dispatcher {
    pub fn set_app_details(&self, details: AppDetails) {
        *self.app.write().unwrap_or_else(PoisonError::into_inner) = details;
    }

    #[must_use]
    pub fn app_details(&self) -> AppDetails {
        self.app
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The two `Info` records the banner consists of: process identity, then fanlog's
    /// version and this dispatcher's threshold. Both carry the same timestamp.
    #[must_use]
    pub fn banner_records(&self) -> [LogRecord; 2] {
        let mut process = LogRecord::system(
            Level::Info,
            self.app_details().summary(),
            Arc::clone(&self.identifier),
        );
        let mut library = LogRecord::system(
            Level::Info,
            format!(
                "fanlog Version: {} - Level: {}",
                env!("CARGO_PKG_VERSION"),
                self.level()
            ),
            Arc::clone(&self.identifier),
        );
        let now = Local::now();
        process.timestamp = now;
        library.timestamp = now;
        [process, library]
    }

    /// Emits the banner to `selected`, or to every registered sink when `None`.
    ///
    /// Records go through [`Destination::process_internal`], so each sink applies only its own
    /// threshold; the dispatcher does no filtering of its own here.
    pub fn log_app_details(&self, selected: Option<&dyn Destination>) {
        let records = self.banner_records();

        if let Some(destination) = selected {
            for record in &records {
                destination.process_internal(record);
            }
            return;
        }

        for destination in self.snapshot().iter() {
            for record in &records {
                destination.process_internal(record);
            }
        }
    }
}
