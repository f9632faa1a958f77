//! Core logger types and traits

pub mod error;
pub mod event;
pub mod fan_out;
pub mod field;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod pool;
pub mod timestamp;
pub mod value;
pub mod writer;

pub use error::{CommitError, LoggerError, Result};
pub use event::{Caller, CommitResult, Event, Outcome, Termination};
pub use fan_out::FanOut;
pub use field::Field;
pub use level::Level;
pub use logger::{EventSource, Logger, LoggerBuilder, TaggedLogger};
pub use metrics::LoggerMetrics;
pub use options::{LoggerOptions, OutputFormat, OutputTarget};
pub use pool::{Pool, Reset, DEFAULT_MAX_IDLE};
pub use timestamp::TimestampFormat;
pub use value::{format_duration, Value, ValueShape};
pub use writer::{Record, Writer};
