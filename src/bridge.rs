//! Adapter for the `log` crate facade
//!
//! [`LogBridge`] implements [`log::Log`] on top of a [`Logger`], so libraries
//! logging through `log` end up in the same writers as the application.
//!
//! Level mapping: `Error`, `Warn`, `Info` and `Debug` map to the levels of
//! the same name. Everything else, `Trace` included, maps to
//! [`Level::Off`] and is treated as disabled.
//!
//! Structured key/values become fields in order. The key `error` is
//! attached as the event's error instead.

use crate::core::error::{LoggerError, Result};
use crate::core::event::Caller;
use crate::core::level::Level;
use crate::core::logger::{EventSource, Logger};
use crate::core::value::Value;
use log::kv::{self, VisitSource};

/// Key whose value becomes the event's error
pub const ERROR_KEY: &str = "error";

pub fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        _ => Level::Off,
    }
}

#[derive(Default)]
struct Collector {
    fields: Vec<Value>,
    error: Option<String>,
}

impl<'kvs> VisitSource<'kvs> for Collector {
    fn visit_pair(
        &mut self,
        key: kv::Key<'kvs>,
        value: kv::Value<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        if key.as_str() == ERROR_KEY {
            self.error = Some(value.to_string());
        } else {
            self.fields.push(Value::from(key.as_str()));
            self.fields.push(convert(&value));
        }
        Ok(())
    }
}

fn convert(value: &kv::Value<'_>) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(i) = value.to_i64() {
        Value::Int(i)
    } else if let Some(u) = value.to_u64() {
        Value::Uint(u)
    } else if let Some(f) = value.to_f64() {
        Value::Float(f)
    } else if let Some(s) = value.to_borrowed_str() {
        Value::from(s)
    } else {
        Value::Display(value.to_string())
    }
}

/// `log::Log` implementation writing through a [`Logger`].
///
/// # Example
///
/// ```no_run
/// use rust_event_logger::prelude::*;
/// use rust_event_logger::bridge::LogBridge;
///
/// let logger = Logger::with_writer(PrettyWriter::stdout());
/// LogBridge::new(logger)
///     .init(log::LevelFilter::Debug)
///     .expect("no other logger installed");
///
/// log::info!(user = "bob"; "logged in");
/// ```
pub struct LogBridge {
    logger: Logger,
    target_tags: bool,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            target_tags: false,
        }
    }

    /// Tag each event with the record's target (the module path by default).
    #[must_use]
    pub fn with_target_tags(mut self, enable: bool) -> Self {
        self.target_tags = enable;
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Install as the global `log` logger.
    pub fn init(self, max_level: log::LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| LoggerError::SetLogger(e.to_string()))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.level().allows(map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut collector = Collector::default();
        if let Err(e) = record.key_values().visit(&mut collector) {
            eprintln!("[LOGGER ERROR] Failed to read log record key/values: {}", e);
        }

        let mut event = self
            .logger
            .with_level(map_level(record.level()))
            .fields(collector.fields);
        if self.target_tags {
            event = event.tag(record.target());
        }
        if let Some(error) = collector.error {
            event = event.err(error);
        }

        let site = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => Some(Caller { file, line }),
            _ => None,
        };
        let message = record.args().to_string();
        let result = event.commit(&message, site);
        if let Err(e) = result {
            eprintln!(
                "[LOGGER ERROR] Failed to write bridged log record: {}",
                e.source
            );
        }
    }

    fn flush(&self) {
        if let Err(e) = self.logger.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush bridged logger: {}", e);
        }
    }
}
