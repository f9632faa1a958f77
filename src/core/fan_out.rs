//! Broadcasting to several writers

use super::error::Result;
use super::writer::{Record, Writer};
use std::sync::Arc;

/// Calls its writers in order and stops at the first failure.
///
/// The failing writer's error is returned unchanged and the writers after
/// it are skipped. `flush` and `close` follow the same rule.
#[derive(Clone, Default)]
pub struct FanOut {
    writers: Vec<Arc<dyn Writer>>,
}

impl FanOut {
    pub fn new(writers: Vec<Arc<dyn Writer>>) -> Self {
        Self { writers }
    }

    pub fn push(&mut self, writer: Arc<dyn Writer>) {
        self.writers.push(writer);
    }

    #[must_use]
    pub fn with(mut self, writer: impl Writer + 'static) -> Self {
        self.writers.push(Arc::new(writer));
        self
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl Writer for FanOut {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        for writer in &self.writers {
            writer.write(record)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        for writer in &self.writers {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        for writer in &self.writers {
            writer.close()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fan-out"
    }
}
