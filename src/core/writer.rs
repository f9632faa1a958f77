//! Writer trait for log output destinations

use super::error::Result;
use super::event::Caller;
use super::field::Field;
use super::level::Level;
use std::error::Error as StdError;
use std::sync::Arc;

/// Everything a writer gets for one committed event.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    /// Attachment order
    pub fields: &'a [Field],
    pub tag: Option<&'a str>,
    pub error: Option<&'a (dyn StdError + Send + Sync + 'static)>,
    pub caller: Option<Caller>,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            fields: &[],
            tag: None,
            error: None,
            caller: None,
            message,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: &'a [Field]) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: &'a (dyn StdError + Send + Sync + 'static)) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }
}

/// A destination for committed events.
///
/// Writers are shared between threads. Implementations that own an output
/// stream serialize their own writes so one event's output is never
/// interleaved with another's.
pub trait Writer: Send + Sync {
    fn write(&self, record: &Record<'_>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Release underlying resources. Writes after a close may fail.
    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<W: Writer + ?Sized> Writer for Arc<W> {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        (**self).write(record)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
