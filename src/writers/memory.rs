//! In-memory writer

use crate::core::error::Result;
use crate::core::event::Caller;
use crate::core::field::Field;
use crate::core::level::Level;
use crate::core::writer::{Record, Writer};
use parking_lot::Mutex;

/// Owned copy of a written [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: Level,
    pub tag: Option<String>,
    pub message: String,
    /// Message of the attached error
    pub error: Option<String>,
    pub fields: Vec<Field>,
    pub caller: Option<Caller>,
}

impl From<&Record<'_>> for CapturedRecord {
    fn from(record: &Record<'_>) -> Self {
        Self {
            level: record.level,
            tag: record.tag.map(str::to_owned),
            message: record.message.to_owned(),
            error: record.error.map(|err| err.to_string()),
            fields: record.fields.to_vec(),
            caller: record.caller,
        }
    }
}

/// Keeps every written record in memory.
///
/// ```
/// use rust_event_logger::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryWriter::new());
/// let logger = Logger::with_writer(Arc::clone(&memory));
///
/// logger.info().field("n", 5).msg("hello").unwrap();
/// assert_eq!(memory.entries()[0].message, "hello");
/// ```
#[derive(Debug, Default)]
pub struct MemoryWriter {
    entries: Mutex<Vec<CapturedRecord>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured records in write order.
    pub fn entries(&self) -> Vec<CapturedRecord> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Writer for MemoryWriter {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        self.entries.lock().push(CapturedRecord::from(record));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
