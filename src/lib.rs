//! # Rust Event Logger
//!
//! A structured, leveled logger built around pooled events.
//!
//! Events are created by a [`Logger`] at one severity, filled with fields,
//! a tag, an error and caller capture through chained calls, and committed
//! to one or more writers.
//!
//! ## Features
//!
//! - **Allocation-light**: events and fields are recycled through pools
//! - **Retry-safe commits**: a failed write leaves the event intact
//! - **Multiple writers**: pretty console/file output, JSON lines, fan-out
//! - **Termination as a value**: Fatal and Panic events report their
//!   termination request instead of exiting behind the caller's back
//! - **`log` bridge**: route the `log` facade into the same writers
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use rust_event_logger::kv;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryWriter::new());
//! let logger = Logger::with_writer(Arc::clone(&memory));
//!
//! logger
//!     .info()
//!     .tag("svc")
//!     .fields(kv!["n", 5, "user", "bob"])
//!     .msg("hello")
//!     .unwrap();
//!
//! let db = logger.tagged("db");
//! db.warn().field("retries", 3).msg("slow query").unwrap();
//!
//! assert_eq!(memory.len(), 2);
//! ```

pub mod bridge;
pub mod core;
pub mod global;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        Caller, CommitError, CommitResult, Event, EventSource, FanOut, Field, Level, Logger,
        LoggerBuilder, LoggerError, LoggerOptions, Outcome, Record, Result, TaggedLogger,
        Termination, TimestampFormat, Value, Writer,
    };
    pub use crate::writers::{JsonWriter, MemoryWriter, PrettyWriter};
}

pub use crate::bridge::LogBridge;
pub use crate::core::{
    Caller, CommitError, CommitResult, Event, EventSource, FanOut, Field, Level, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, Outcome, OutputFormat,
    OutputTarget, Record, Result, TaggedLogger, Termination, TimestampFormat, Value, ValueShape,
    Writer,
};
pub use crate::writers::{JsonWriter, MemoryWriter, PrettyFormatter, PrettyStyles, PrettyWriter};
