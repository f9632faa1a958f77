//! JSON lines writer for structured logging
//!
//! Each record becomes one JSON object on its own line, ready for log
//! aggregation tools.

use crate::core::error::{LoggerError, Result};
use crate::core::event::Caller;
use crate::core::field::Field;
use crate::core::timestamp::TimestampFormat;
use crate::core::writer::{Record, Writer};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<serde_json::Value>,
    level: u8,
    level_string: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "<[Field]>::is_empty")]
    fields: &'a [Field],
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<Caller>,
}

impl<'a> JsonEntry<'a> {
    fn new(record: &Record<'a>, time_format: Option<&TimestampFormat>, now: DateTime<Utc>) -> Self {
        let timestamp = time_format.map(|format| match format.numeric(&now) {
            Some(n) => serde_json::Value::from(n),
            None => serde_json::Value::String(format.format(&now)),
        });

        Self {
            timestamp,
            level: record.level.as_u8(),
            level_string: record.level.name(),
            tag: record.tag.filter(|tag| !tag.is_empty()),
            message: record.message,
            error: record.error.map(|err| err.to_string()),
            fields: record.fields,
            caller: record.caller,
        }
    }
}

struct Output<W> {
    sink: W,
    buf: Vec<u8>,
}

/// Writes one JSON object per record.
///
/// Keys: `timestamp`, `level` (numeric), `level_string`, `tag`, `message`,
/// `error`, `fields` (`[{"key": .., "value": ..}]`) and `caller`
/// (`{"file": .., "line": ..}`). Empty parts are omitted.
///
/// # Example
///
/// ```
/// use rust_event_logger::prelude::*;
///
/// let writer = JsonWriter::new(Vec::new()).with_time_format(None);
/// writer.write(&Record::new(Level::Warn, "careful")).unwrap();
///
/// let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(out, "{\"level\":4,\"level_string\":\"warn\",\"message\":\"careful\"}\n");
/// ```
pub struct JsonWriter<W: Write + Send> {
    time_format: Option<TimestampFormat>,
    output: Mutex<Option<Output<W>>>,
}

impl JsonWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl JsonWriter<BufWriter<File>> {
    /// Append JSON lines to the file at `path`, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            time_format: Some(TimestampFormat::Rfc3339),
            output: Mutex::new(Some(Output {
                sink,
                buf: Vec::with_capacity(256),
            })),
        }
    }

    /// Unix formats produce a numeric `timestamp`, `None` omits it.
    #[must_use]
    pub fn with_time_format(mut self, format: Option<TimestampFormat>) -> Self {
        self.time_format = format;
        self
    }

    pub fn into_inner(self) -> Option<W> {
        let output = self.output.lock().take();
        output.map(|output| output.sink)
    }
}

impl<W: Write + Send> Writer for JsonWriter<W> {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        let entry = JsonEntry::new(record, self.time_format.as_ref(), Utc::now());

        let mut guard = self.output.lock();
        let output = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer_closed(self.name()))?;

        output.buf.clear();
        serde_json::to_writer(&mut output.buf, &entry)?;
        output.buf.push(b'\n');
        output
            .sink
            .write_all(&output.buf)
            .map_err(|e| LoggerError::io_operation("writing", "json record", e))
    }

    fn flush(&self) -> Result<()> {
        if let Some(output) = self.output.lock().as_mut() {
            output.sink.flush()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if let Some(mut output) = self.output.lock().take() {
            output.sink.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

impl<W: Write + Send> Drop for JsonWriter<W> {
    fn drop(&mut self) {
        if let Some(output) = self.output.get_mut().as_mut() {
            if let Err(e) = output.sink.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush json writer on drop: {}", e);
            }
        }
    }
}
