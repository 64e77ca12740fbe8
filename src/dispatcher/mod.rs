//! The dispatcher owns an ordered list of sinks and fans each log call out to the ones whose
//! threshold admits it, building the message at most once.
//!
//! The sink list is a copy-on-write snapshot: a log call clones an `Arc` under a short read
//! lock and iterates without holding it, while registration and threshold changes replace
//! the list under the write lock.

mod banner;
mod builder;
mod from_config;
mod message;

pub use banner::AppDetails;
pub use builder::{ConsoleBuilder, DispatcherBuilder, FileBuilder};
pub use message::IntoMessage;

use crate::destination::{CallSite, ConsoleSink, Destination, LogRecord};
use crate::internal;
use crate::level::{AtomicLevel, Level};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Identifier of the process-wide instance returned by [`Dispatcher::global`].
pub const GLOBAL_IDENTIFIER: &str = "fanlog.default";

/// Environment variable that turns colored console output on by default when set to `YES`.
pub const COLORS_ENV: &str = "XcodeColors";

type Destinations = Arc<Vec<Arc<dyn Destination>>>;
type NoMessage = Arc<dyn Fn() -> Option<String> + Send + Sync>;

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

pub struct Dispatcher {
    identifier: Arc<str>,
    level: AtomicLevel,
    colors_enabled: bool,
    destinations: RwLock<Destinations>,
    no_message: RwLock<NoMessage>,
    app: RwLock<AppDetails>,
}

impl Dispatcher {
    /// No sinks, threshold `Debug`, color default taken from the environment.
    #[must_use]
    pub fn new(identifier: impl Into<Arc<str>>) -> Self {
        Self::with_colors(identifier, colors_from_env())
    }

    /// Like [`Dispatcher::new`] plus a stdout console sink named `<identifier>.console`.
    #[must_use]
    pub fn with_console(identifier: impl Into<Arc<str>>) -> Self {
        let dispatcher = Self::new(identifier);
        let console = ConsoleSink::new(format!("{}.console", dispatcher.identifier))
            .level(dispatcher.level())
            .colors(dispatcher.colors_enabled);
        dispatcher.add_destination(Arc::new(console));
        dispatcher
    }

    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Process-wide instance, created with a console sink on first use and never torn down.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::with_console(GLOBAL_IDENTIFIER))
    }

    fn with_colors(identifier: impl Into<Arc<str>>, colors_enabled: bool) -> Self {
        Self {
            identifier: identifier.into(),
            level: AtomicLevel::new(Level::Debug),
            colors_enabled,
            destinations: RwLock::new(Arc::new(Vec::new())),
            no_message: RwLock::new(Arc::new(|| Some(String::new()))),
            app: RwLock::new(AppDetails::detect()),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Color default handed to sinks this dispatcher creates itself.
    #[must_use]
    pub const fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    // --- Logging ---

    /// Core fan-out.
    ///
    /// Walks the sinks in registration order. The first sink enabled for `level` triggers the
    /// single call to `producer`; if that yields no message the whole call is abandoned.
    /// Otherwise one record is built and passed to every enabled sink.
    pub fn log<F, M>(&self, level: Level, site: CallSite, producer: F)
    where
        F: FnOnce() -> M,
        M: IntoMessage,
    {
        let destinations = self.snapshot();
        let mut producer = Some(producer);
        let mut record = None;

        for destination in destinations.iter() {
            if !destination.is_enabled_for(level) {
                continue;
            }

            if let Some(produce) = producer.take() {
                let Some(message) = produce().into_message() else {
                    return;
                };
                record = Some(LogRecord::new(
                    level,
                    message,
                    site,
                    Arc::clone(&self.identifier),
                ));
            }

            if let Some(record) = &record {
                destination.process(record);
            }
        }
    }

    /// Logs with the configured no-message producer, for calls that carry only provenance.
    pub fn log_no_message(&self, level: Level, site: CallSite) {
        let producer = Arc::clone(&self.no_message.read().unwrap_or_else(PoisonError::into_inner));
        self.log(level, site, move || producer());
    }

    /// Replaces the producer used by [`Dispatcher::log_no_message`]. Returning `None` turns
    /// message-less calls into no-ops.
    pub fn set_no_message(&self, producer: impl Fn() -> Option<String> + Send + Sync + 'static) {
        *self.no_message.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(producer);
    }

    /// System message without provenance, delivered through
    /// [`Destination::process_internal`] to every sink enabled for `level`.
    pub fn log_internal(&self, level: Level, message: &str) {
        let destinations = self.snapshot();
        let mut record = None;

        for destination in destinations.iter() {
            if destination.is_enabled_for(level) {
                let record = record.get_or_insert_with(|| {
                    LogRecord::system(level, message, Arc::clone(&self.identifier))
                });
                destination.process_internal(record);
            }
        }
    }

    /// Runs `f` only when `level` passes this dispatcher's own threshold. Sink thresholds
    /// are not consulted.
    pub fn exec(&self, level: Level, f: impl FnOnce()) {
        if self.is_enabled_for(level) {
            f();
        }
    }

    #[track_caller]
    pub fn verbose<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Verbose, CallSite::caller(), producer);
    }

    #[track_caller]
    pub fn debug<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Debug, CallSite::caller(), producer);
    }

    #[track_caller]
    pub fn info<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Info, CallSite::caller(), producer);
    }

    #[track_caller]
    pub fn warning<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Warning, CallSite::caller(), producer);
    }

    #[track_caller]
    pub fn error<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Error, CallSite::caller(), producer);
    }

    #[track_caller]
    pub fn severe<F: FnOnce() -> M, M: IntoMessage>(&self, producer: F) {
        self.log(Level::Severe, CallSite::caller(), producer);
    }

    pub fn verbose_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Verbose, f);
    }

    pub fn debug_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Debug, f);
    }

    pub fn info_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Info, f);
    }

    pub fn warning_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Warning, f);
    }

    pub fn error_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Error, f);
    }

    pub fn severe_exec(&self, f: impl FnOnce()) {
        self.exec(Level::Severe, f);
    }

    // --- Threshold ---

    #[must_use]
    pub fn level(&self) -> Level {
        self.level.get()
    }

    /// `level >= threshold` against the dispatcher's own threshold.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.level.allows(level)
    }

    /// Sets the dispatcher threshold and writes it onto every sink registered right now.
    /// Sinks added later keep whatever threshold they arrive with.
    pub fn set_level(&self, level: Level) {
        let destinations = self
            .destinations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.level.set(level);
        for destination in destinations.iter() {
            destination.set_level(level);
        }
    }

    // --- Registration ---

    /// Appends `destination` unless its identifier is already taken.
    pub fn add_destination(&self, destination: Arc<dyn Destination>) -> bool {
        let replaced = {
            let mut destinations = self
                .destinations
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            if destinations
                .iter()
                .any(|d| d.identifier() == destination.identifier())
            {
                None
            } else {
                let mut next = Vec::with_capacity(destinations.len() + 1);
                next.extend(destinations.iter().cloned());
                next.push(Arc::clone(&destination));
                Some(std::mem::replace(&mut *destinations, Arc::new(next)))
            }
        };

        // Released outside the lock.
        let added = replaced.is_some();
        drop(replaced);

        if !added {
            internal::warn(
                "DISPATCHER",
                &format!(
                    "{}: destination '{}' already registered",
                    self.identifier,
                    destination.identifier()
                ),
            );
        }
        added
    }

    /// Drops the sink with this identifier. Unknown identifiers are ignored.
    ///
    /// The removed sink is released after the registry lock is, so a sink with a costly
    /// `Drop` never stalls concurrent log calls.
    pub fn remove_destination(&self, identifier: &str) {
        let previous = {
            let mut destinations = self
                .destinations
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            if !destinations.iter().any(|d| d.identifier() == identifier) {
                return;
            }
            let next = destinations
                .iter()
                .filter(|d| d.identifier() != identifier)
                .cloned()
                .collect();
            std::mem::replace(&mut *destinations, Arc::new(next))
        };
        drop(previous);
    }

    pub fn remove(&self, destination: &dyn Destination) {
        self.remove_destination(destination.identifier());
    }

    #[must_use]
    pub fn destination(&self, identifier: &str) -> Option<Arc<dyn Destination>> {
        self.snapshot()
            .iter()
            .find(|d| d.identifier() == identifier)
            .cloned()
    }

    #[must_use]
    pub fn destination_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Identifiers in fan-out order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|d| d.identifier().to_string())
            .collect()
    }

    /// Waits for every sink to push out what it has accepted so far.
    ///
    /// # Errors
    /// Returns the first error reported by a sink; the remaining sinks are still flushed.
    pub fn flush(&self) -> Result<(), crate::Error> {
        let mut first_error = None;
        for destination in self.snapshot().iter() {
            if let Err(e) = destination.flush()
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn snapshot(&self) -> Destinations {
        Arc::clone(
            &self
                .destinations
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("identifier", &&*self.identifier)
            .field("level", &self.level())
            .field("destinations", &self.identifiers())
            .finish_non_exhaustive()
    }
}

fn colors_from_env() -> bool {
    std::env::var(COLORS_ENV).is_ok_and(|value| value == "YES")
}
