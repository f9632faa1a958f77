//! In-flight log events
//!
//! An [`Event`] is created by a logger at one severity, filled through the
//! chainable mutators and ended by exactly one of [`Event::msg`],
//! [`Event::msgf`], [`Event::send`] or [`Event::discard`].
//!
//! The event's storage comes from a shared pool. It goes back to the pool
//! after a successful commit or a discard. A failed commit keeps it, so the
//! same commit can be retried with identical data. An event that is simply
//! dropped is freed without being recycled.

use super::error::CommitError;
use super::field::{Field, FIELD_POOL};
use super::level::Level;
use super::logger::{self, Shared};
use super::pool::{Pool, Reset};
use super::value::Value;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub(crate) static EVENT_POOL: Pool<Box<EventRecord>> = Pool::new(EventRecord::boxed);

/// Result of a commit.
pub type CommitResult = std::result::Result<Outcome, CommitError>;

/// Pooled storage behind an [`Event`].
#[derive(Debug)]
pub(crate) struct EventRecord {
    /// Where attached fields come from and go back to
    field_pool: &'static Pool<Field>,
    pub(crate) level: Level,
    pub(crate) fields: Vec<Field>,
    pub(crate) tag: String,
    pub(crate) error: Option<BoxError>,
    pub(crate) caller: bool,
}

impl EventRecord {
    fn boxed() -> Box<Self> {
        Self::boxed_with(&FIELD_POOL)
    }

    fn boxed_with(field_pool: &'static Pool<Field>) -> Box<Self> {
        Box::new(Self {
            field_pool,
            level: Level::Off,
            fields: Vec::with_capacity(10),
            tag: String::new(),
            error: None,
            caller: false,
        })
    }

    fn push_field(&mut self, key: Value, value: Value) {
        let field = Field::pooled(self.field_pool, key, value);
        self.fields.push(field);
    }
}

impl Reset for EventRecord {
    fn reset(&mut self) {
        for field in self.fields.drain(..) {
            self.field_pool.put(field);
        }
        self.level = Level::Off;
        self.tag.clear();
        self.error = None;
        self.caller = false;
    }
}

/// Source location of the commit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Process termination requested by a Fatal or Panic event.
///
/// The logger only reports the request; the application decides when to act
/// on it, typically by calling [`Termination::enforce`]. A request is made
/// whenever the event passes the level gate, even if the write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Exit the process with `code`
    Exit { code: i32 },
    /// Abort the current thread of control with `message`
    Panic { message: String },
}

impl Termination {
    pub(crate) fn for_level(level: Level, message: &str) -> Option<Self> {
        match level {
            Level::Fatal => Some(Termination::Exit { code: 1 }),
            Level::Panic => Some(Termination::Panic {
                message: message.to_string(),
            }),
            _ => None,
        }
    }

    pub fn enforce(self) -> ! {
        match self {
            Termination::Exit { code } => std::process::exit(code),
            Termination::Panic { message } => panic!("{}", message),
        }
    }
}

/// Successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handed to the writer
    Written,
    /// Level gate miss, no writer, or an event without a logger
    Suppressed,
    /// Handed to the writer (if any) and termination requested
    Terminate(Termination),
}

impl Outcome {
    /// Act on a termination request, otherwise hand the outcome back.
    pub fn enforce(self) -> Self {
        if let Outcome::Terminate(termination) = self {
            termination.enforce();
        }
        self
    }

    pub fn termination(&self) -> Option<&Termination> {
        match self {
            Outcome::Terminate(termination) => Some(termination),
            _ => None,
        }
    }
}

/// A log event under construction.
#[must_use = "events must be committed with msg/msgf/send or given back with discard"]
#[derive(Default)]
pub struct Event<'a> {
    record: Option<Box<EventRecord>>,
    owner: Option<&'a Shared>,
}

impl<'a> Event<'a> {
    pub(crate) fn new(owner: &'a Shared, level: Level) -> Self {
        let mut record = EVENT_POOL.get();
        record.level = level;
        Self {
            record: Some(record),
            owner: Some(owner),
        }
    }

    fn with_record(mut self, f: impl FnOnce(&mut EventRecord)) -> Self {
        if let Some(record) = self.record.as_deref_mut() {
            f(record);
        }
        self
    }

    /// Set the event's tag, replacing any tag set by the logger.
    pub fn tag(self, tag: &str) -> Self {
        self.with_record(|record| {
            record.tag.clear();
            record.tag.push_str(tag);
        })
    }

    /// Attach alternating keys and values.
    ///
    /// With an odd number of items the last key is attached with a
    /// [`Value::Null`] value.
    ///
    /// ```
    /// use rust_event_logger::prelude::*;
    /// use rust_event_logger::kv;
    ///
    /// let logger = Logger::new();
    /// let event = logger.info().fields(kv!["name", "Bob", "age", 24, "hobbies"]);
    /// assert_eq!(event.field_count(), 3);
    /// event.discard();
    /// ```
    pub fn fields<I>(self, kv: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_record(|record| {
            let mut kv = kv.into_iter();
            while let Some(key) = kv.next() {
                let value = kv.next().map_or(Value::Null, Into::into);
                record.push_field(key.into(), value);
            }
        })
    }

    /// Attach a single key/value field.
    pub fn field(self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.with_record(|record| {
            record.push_field(key.into(), value.into());
        })
    }

    /// Attach an error, replacing any previously attached one.
    pub fn err<E: Into<BoxError>>(self, err: E) -> Self {
        self.with_record(|record| record.error = Some(err.into()))
    }

    /// Capture the source location of the commit call.
    pub fn caller(self) -> Self {
        self.with_record(|record| record.caller = true)
    }

    /// Level the event was created at, `None` once it was given back.
    pub fn level(&self) -> Option<Level> {
        self.record.as_ref().map(|record| record.level)
    }

    pub fn field_count(&self) -> usize {
        self.record.as_ref().map_or(0, |record| record.fields.len())
    }

    pub fn fields_ref(&self) -> &[Field] {
        self.record
            .as_ref()
            .map_or(&[][..], |record| record.fields.as_slice())
    }

    pub fn tag_ref(&self) -> Option<&str> {
        self.record
            .as_ref()
            .map(|record| record.tag.as_str())
            .filter(|tag| !tag.is_empty())
    }

    /// True while the event holds pooled storage and a logger.
    pub fn is_live(&self) -> bool {
        self.record.is_some() && self.owner.is_some()
    }

    /// Commit the event with `message`.
    ///
    /// On success the event's storage returns to the pool and later commits
    /// are no-ops. On failure the event is left untouched so the commit can
    /// be retried.
    #[track_caller]
    pub fn msg(&mut self, message: impl AsRef<str>) -> CommitResult {
        self.commit(message.as_ref(), Some(Caller::from(Location::caller())))
    }

    /// Commit with an explicit call site, `None` when it is unknown.
    pub(crate) fn commit(&mut self, message: &str, site: Option<Caller>) -> CommitResult {
        let (Some(owner), Some(record)) = (self.owner, self.record.as_deref()) else {
            return Ok(Outcome::Suppressed);
        };

        let outcome = logger::dispatch(owner, record, message, site)?;
        self.give_back();
        Ok(outcome)
    }

    /// Commit the event with a formatted message.
    #[track_caller]
    pub fn msgf(&mut self, args: fmt::Arguments<'_>) -> CommitResult {
        match args.as_str() {
            Some(message) => self.msg(message),
            None => self.msg(args.to_string()),
        }
    }

    /// Commit the event without a message.
    #[track_caller]
    pub fn send(&mut self) -> CommitResult {
        self.msg("")
    }

    /// Give the event's storage back without writing anything.
    pub fn discard(mut self) {
        self.give_back();
    }

    fn give_back(&mut self) {
        if let Some(record) = self.record.take() {
            EVENT_POOL.put(record);
        }
        self.owner = None;
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("record", &self.record)
            .field("bound", &self.owner.is_some())
            .finish()
    }
}
