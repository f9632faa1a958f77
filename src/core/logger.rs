//! Logger, tagged views and the write path
//!
//! A [`Logger`] owns a handle to its settings (writers, minimum level,
//! caller capture, default tag). Two ways of deriving a logger exist and
//! they behave differently on purpose:
//!
//! - [`Logger::copy`] snapshots the settings into a new handle. Later
//!   changes on either side are invisible to the other.
//! - [`Logger::tagged`] returns a [`TaggedLogger`] that shares the handle and
//!   only overrides the tag. Later changes to the parent's writers, level or
//!   caller flag are visible through the view.
//!
//! Fatal and Panic events that pass the level gate make the commit report a
//! [`Termination`]. The logger does not exit or panic by itself unless it
//! was built with `enforce_termination`. A filtered-out Fatal/Panic event
//! requests nothing; a failed write still does.

use super::error::{CommitError, Result};
use super::event::{Caller, CommitResult, Event, EventRecord, Outcome, Termination};
use super::fan_out::FanOut;
use super::level::Level;
use super::metrics::LoggerMetrics;
use super::writer::{Record, Writer};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Settings {
    writers: Vec<Arc<dyn Writer>>,
    /// `None` without writers, the writer itself for one, a fan-out for more
    sink: Option<Arc<dyn Writer>>,
    level: Level,
    caller: bool,
    tag: Option<String>,
    enforce_termination: bool,
}

impl Settings {
    fn new() -> Self {
        Self {
            writers: Vec::new(),
            sink: None,
            level: Level::Info,
            caller: false,
            tag: None,
            enforce_termination: false,
        }
    }

    fn rebuild_sink(&mut self) {
        self.sink = match self.writers.len() {
            0 => None,
            1 => Some(Arc::clone(&self.writers[0])),
            _ => Some(Arc::new(FanOut::new(self.writers.clone()))),
        };
    }
}

/// Settings handle shared by a logger and its tagged views.
pub(crate) struct Shared {
    settings: RwLock<Settings>,
    metrics: LoggerMetrics,
}

impl Shared {
    fn from_settings(settings: Settings) -> Arc<Self> {
        Arc::new(Self {
            settings: RwLock::new(settings),
            metrics: LoggerMetrics::new(),
        })
    }

    fn new_event(&self, level: Level, tag_override: Option<&str>) -> Event<'_> {
        let settings = self.settings.read();
        let mut event = Event::new(self, level);
        if let Some(tag) = tag_override.or(settings.tag.as_deref()) {
            event = event.tag(tag);
        }
        if settings.caller {
            event = event.caller();
        }
        event
    }

    fn set_writers(&self, writers: Vec<Arc<dyn Writer>>) {
        let mut settings = self.settings.write();
        settings.writers = writers;
        settings.rebuild_sink();
    }

    fn add_writer(&self, writer: Arc<dyn Writer>) {
        let mut settings = self.settings.write();
        settings.writers.push(writer);
        settings.rebuild_sink();
    }

    fn sink(&self) -> Option<Arc<dyn Writer>> {
        self.settings.read().sink.clone()
    }
}

/// Write path of one commit.
///
/// Order: level gate, termination request, writer. The record is only
/// borrowed, so a failed write leaves the event intact for a retry.
pub(crate) fn dispatch(
    shared: &Shared,
    record: &EventRecord,
    message: &str,
    site: Option<Caller>,
) -> CommitResult {
    let (sink, min_level, enforce) = {
        let settings = shared.settings.read();
        (
            settings.sink.clone(),
            settings.level,
            settings.enforce_termination,
        )
    };

    if !min_level.allows(record.level) {
        shared.metrics.record_suppressed();
        return Ok(Outcome::Suppressed);
    }

    let termination = Termination::for_level(record.level, message);
    if termination.is_some() {
        shared.metrics.record_termination();
    }

    let outcome = match &sink {
        None => {
            shared.metrics.record_suppressed();
            Ok(termination.map_or(Outcome::Suppressed, Outcome::Terminate))
        }
        Some(sink) => {
            let mut out = Record::new(record.level, message).with_fields(&record.fields);
            if !record.tag.is_empty() {
                out = out.with_tag(&record.tag);
            }
            if let Some(err) = record.error.as_deref() {
                out = out.with_error(err);
            }
            if let Some(site) = site.filter(|_| record.caller) {
                out = out.with_caller(site);
            }

            match sink.write(&out) {
                Ok(()) => {
                    shared.metrics.record_written();
                    Ok(termination.map_or(Outcome::Written, Outcome::Terminate))
                }
                Err(err) => {
                    shared.metrics.record_failed();
                    Err(CommitError::new(err, termination))
                }
            }
        }
    };

    if enforce {
        let requested = match &outcome {
            Ok(Outcome::Terminate(termination)) => Some(termination.clone()),
            Err(err) => err.termination.clone(),
            Ok(_) => None,
        };
        if let Some(termination) = requested {
            if let Some(sink) = &sink {
                if let Err(err) = sink.flush() {
                    eprintln!("[LOGGER ERROR] Flush before termination failed: {}", err);
                }
            }
            termination.enforce();
        }
    }

    outcome
}

/// Event factories shared by [`Logger`] and [`TaggedLogger`].
pub trait EventSource {
    /// Create an event at `level`.
    fn with_level(&self, level: Level) -> Event<'_>;

    fn trace(&self) -> Event<'_> {
        self.with_level(Level::Trace)
    }

    fn debug(&self) -> Event<'_> {
        self.with_level(Level::Debug)
    }

    fn info(&self) -> Event<'_> {
        self.with_level(Level::Info)
    }

    fn warn(&self) -> Event<'_> {
        self.with_level(Level::Warn)
    }

    fn error(&self) -> Event<'_> {
        self.with_level(Level::Error)
    }

    /// Committing requests [`Termination::Exit`] with code 1.
    fn fatal(&self) -> Event<'_> {
        self.with_level(Level::Fatal)
    }

    /// Committing requests [`Termination::Panic`] with the message.
    fn panic(&self) -> Event<'_> {
        self.with_level(Level::Panic)
    }
}

pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    /// Logger at `Info` without writers. It writes nothing until one is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Shared::from_settings(Settings::new()),
        }
    }

    #[must_use]
    pub fn with_writer(writer: impl Writer + 'static) -> Self {
        let logger = Self::new();
        logger.set_writer(writer);
        logger
    }

    /// Replace all writers with `writer`.
    pub fn set_writer(&self, writer: impl Writer + 'static) -> &Self {
        self.shared.set_writers(vec![Arc::new(writer)]);
        self
    }

    /// Replace all writers with an already shared `writer`.
    pub fn set_shared_writer(&self, writer: Arc<dyn Writer>) -> &Self {
        self.shared.set_writers(vec![writer]);
        self
    }

    /// Add a writer; with more than one writer the logger writes through a [`FanOut`].
    pub fn add_writer(&self, writer: impl Writer + 'static) -> &Self {
        self.shared.add_writer(Arc::new(writer));
        self
    }

    pub fn add_shared_writer(&self, writer: Arc<dyn Writer>) -> &Self {
        self.shared.add_writer(writer);
        self
    }

    /// Set the minimum level events need to be written.
    pub fn set_level(&self, level: Level) -> &Self {
        self.shared.settings.write().level = level;
        self
    }

    /// Enable or disable caller capture for every new event.
    pub fn set_caller(&self, enable: bool) -> &Self {
        self.shared.settings.write().caller = enable;
        self
    }

    /// Tag applied to every new event. Events can still override it.
    pub fn set_tag(&self, tag: impl Into<String>) -> &Self {
        self.shared.settings.write().tag = Some(tag.into());
        self
    }

    pub fn clear_tag(&self) -> &Self {
        self.shared.settings.write().tag = None;
        self
    }

    /// Exit or panic right after writing a Fatal or Panic event.
    pub fn set_enforce_termination(&self, enforce: bool) -> &Self {
        self.shared.settings.write().enforce_termination = enforce;
        self
    }

    pub fn level(&self) -> Level {
        self.shared.settings.read().level
    }

    pub fn caller_enabled(&self) -> bool {
        self.shared.settings.read().caller
    }

    pub fn default_tag(&self) -> Option<String> {
        self.shared.settings.read().tag.clone()
    }

    pub fn writer_count(&self) -> usize {
        self.shared.settings.read().writers.len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Independent snapshot of this logger's settings.
    ///
    /// Writers are shared by reference; everything else is copied.
    #[must_use]
    pub fn copy(&self) -> Logger {
        let settings = self.shared.settings.read().clone();
        Logger {
            shared: Shared::from_settings(settings),
        }
    }

    /// View on this logger that tags every event with `tag`.
    pub fn tagged(&self, tag: impl Into<String>) -> TaggedLogger {
        TaggedLogger {
            shared: Arc::clone(&self.shared),
            tag: tag.into(),
        }
    }

    pub fn flush(&self) -> Result<()> {
        match self.shared.sink() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    /// Close all writers, stopping at the first failure.
    pub fn close(&self) -> Result<()> {
        match self.shared.sink() {
            Some(sink) => sink.close(),
            None => Ok(()),
        }
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for Logger {
    fn with_level(&self, level: Level) -> Event<'_> {
        self.shared.new_event(level, None)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.shared.settings.read();
        f.debug_struct("Logger")
            .field("level", &settings.level)
            .field("caller", &settings.caller)
            .field("tag", &settings.tag)
            .field("writers", &settings.writers.len())
            .finish()
    }
}

/// Logger view with its own tag and its parent's live settings.
pub struct TaggedLogger {
    shared: Arc<Shared>,
    tag: String,
}

impl TaggedLogger {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Another view on the same parent with a different tag.
    pub fn tagged(&self, tag: impl Into<String>) -> TaggedLogger {
        TaggedLogger {
            shared: Arc::clone(&self.shared),
            tag: tag.into(),
        }
    }

    /// Independent logger with the parent's current settings and this view's tag.
    #[must_use]
    pub fn copy(&self) -> Logger {
        let mut settings = self.shared.settings.read().clone();
        settings.tag = Some(self.tag.clone());
        Logger {
            shared: Shared::from_settings(settings),
        }
    }

    /// Changes the parent's writers.
    pub fn set_writer(&self, writer: impl Writer + 'static) -> &Self {
        self.shared.set_writers(vec![Arc::new(writer)]);
        self
    }

    /// Adds to the parent's writers.
    pub fn add_writer(&self, writer: impl Writer + 'static) -> &Self {
        self.shared.add_writer(Arc::new(writer));
        self
    }

    /// Changes the parent's minimum level.
    pub fn set_level(&self, level: Level) -> &Self {
        self.shared.settings.write().level = level;
        self
    }

    /// Changes the parent's caller capture.
    pub fn set_caller(&self, enable: bool) -> &Self {
        self.shared.settings.write().caller = enable;
        self
    }

    pub fn level(&self) -> Level {
        self.shared.settings.read().level
    }

    pub fn caller_enabled(&self) -> bool {
        self.shared.settings.read().caller
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }
}

impl EventSource for TaggedLogger {
    fn with_level(&self, level: Level) -> Event<'_> {
        self.shared.new_event(level, Some(&self.tag))
    }
}

impl fmt::Debug for TaggedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedLogger")
            .field("tag", &self.tag)
            .field("level", &self.level())
            .finish()
    }
}

/// Builder for configuring a [`Logger`]
///
/// # Example
///
/// ```
/// use rust_event_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(Level::Debug)
///     .caller(true)
///     .tag("api")
///     .build();
/// assert_eq!(logger.level(), Level::Debug);
/// ```
pub struct LoggerBuilder {
    settings: Settings,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::new(),
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.settings.level = level;
        self
    }

    /// Add a writer. Two or more writers are combined into a fan-out.
    #[must_use]
    pub fn writer<W: Writer + 'static>(mut self, writer: W) -> Self {
        self.settings.writers.push(Arc::new(writer));
        self
    }

    #[must_use]
    pub fn shared_writer(mut self, writer: Arc<dyn Writer>) -> Self {
        self.settings.writers.push(writer);
        self
    }

    #[must_use]
    pub fn caller(mut self, enable: bool) -> Self {
        self.settings.caller = enable;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.settings.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn enforce_termination(mut self, enforce: bool) -> Self {
        self.settings.enforce_termination = enforce;
        self
    }

    pub fn build(mut self) -> Logger {
        self.settings.rebuild_sink();
        Logger {
            shared: Shared::from_settings(self.settings),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
