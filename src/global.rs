//! Process-wide convenience logger
//!
//! A lazily built [`Logger`] writing colored pretty lines to stdout at
//! `Info`. Unlike loggers built by hand, it enforces terminations: a
//! committed Fatal event exits the process and a committed Panic event
//! panics. Nothing else in the crate reads it.
//!
//! ```no_run
//! use rust_event_logger::global;
//!
//! global::info().field("port", 8080).msg("listening").unwrap();
//! ```

use crate::core::event::Event;
use crate::core::level::Level;
use crate::core::logger::{EventSource, Logger, TaggedLogger};
use crate::core::writer::Writer;
use crate::writers::PrettyWriter;
use once_cell::sync::Lazy;

static GLOBAL_LOGGER: Lazy<Logger> = Lazy::new(|| {
    Logger::builder()
        .writer(PrettyWriter::stdout())
        .min_level(Level::Info)
        .enforce_termination(true)
        .build()
});

pub fn logger() -> &'static Logger {
    &GLOBAL_LOGGER
}

pub fn set_writer(writer: impl Writer + 'static) {
    GLOBAL_LOGGER.set_writer(writer);
}

pub fn add_writer(writer: impl Writer + 'static) {
    GLOBAL_LOGGER.add_writer(writer);
}

pub fn set_level(level: Level) {
    GLOBAL_LOGGER.set_level(level);
}

pub fn set_caller(enable: bool) {
    GLOBAL_LOGGER.set_caller(enable);
}

/// Independent snapshot of the global logger's current settings.
pub fn copy() -> Logger {
    GLOBAL_LOGGER.copy()
}

pub fn tagged(tag: impl Into<String>) -> TaggedLogger {
    GLOBAL_LOGGER.tagged(tag)
}

pub fn with_level(level: Level) -> Event<'static> {
    GLOBAL_LOGGER.with_level(level)
}

pub fn trace() -> Event<'static> {
    GLOBAL_LOGGER.trace()
}

pub fn debug() -> Event<'static> {
    GLOBAL_LOGGER.debug()
}

pub fn info() -> Event<'static> {
    GLOBAL_LOGGER.info()
}

pub fn warn() -> Event<'static> {
    GLOBAL_LOGGER.warn()
}

pub fn error() -> Event<'static> {
    GLOBAL_LOGGER.error()
}

/// Committing exits the process with status 1.
pub fn fatal() -> Event<'static> {
    GLOBAL_LOGGER.fatal()
}

/// Committing panics with the message.
pub fn panic() -> Event<'static> {
    GLOBAL_LOGGER.panic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Outcome;
    use crate::writers::MemoryWriter;
    use std::sync::Arc;

    // The only test touching the shared instance.
    #[test]
    fn test_global_logger() {
        let memory = Arc::new(MemoryWriter::new());
        set_writer(Arc::clone(&memory));
        set_level(Level::Debug);

        debug().field("k", 1).msg("first").unwrap();
        tagged("svc").info().msg("second").unwrap();
        assert_eq!(trace().msg("hidden").unwrap(), Outcome::Suppressed);

        let snapshot = copy();
        set_level(Level::Error);
        assert_eq!(snapshot.level(), Level::Debug);
        assert_eq!(logger().level(), Level::Error);

        let entries = memory.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tag.as_deref(), Some("svc"));
    }
}
