//! Logging macros for ergonomic log message formatting.
//!
//! The level macros commit a formatted message on anything implementing
//! [`EventSource`](crate::EventSource) and evaluate to the
//! [`CommitResult`](crate::CommitResult).
//!
//! # Examples
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use rust_event_logger::{info, kv};
//!
//! let logger = Logger::with_writer(MemoryWriter::new());
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // Fields go through the event API
//! logger.info().fields(kv!["port", port, "tls", true]).msg("bound").unwrap();
//! ```

/// Build the alternating key/value list for [`Event::fields`](crate::Event::fields).
///
/// ```
/// use rust_event_logger::{kv, Value};
///
/// let items = kv!["user", "bob", "age", 24];
/// assert_eq!(items[3], Value::Int(24));
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($item)),+]
    };
}

/// Commit a formatted message at a runtime level.
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_event_logger::log_event;
/// log_event!(logger, Level::Warn, "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! log_event {
    ($source:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::EventSource as _;
        ($source).with_level($level).msgf(::std::format_args!($($arg)+))
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_level(Level::Trace);
/// use rust_event_logger::trace;
/// trace!(logger, "Entering function: calculate()").unwrap();
/// ```
#[macro_export]
macro_rules! trace {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_event_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// The result carries a [`Termination`](crate::Termination) request that
/// the caller is expected to act on.
#[macro_export]
macro_rules! fatal {
    ($source:expr, $($arg:tt)+) => {
        $crate::log_event!($source, $crate::Level::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::event::{Outcome, Termination};
    use crate::core::logger::Logger;
    use crate::core::level::Level;
    use crate::core::value::Value;
    use crate::writers::MemoryWriter;
    use std::sync::Arc;

    #[test]
    fn test_kv_macro() {
        let empty = kv![];
        assert!(empty.is_empty());

        let items = kv!["a", 1, "b", 2.5, "c"];
        assert_eq!(
            items,
            vec![
                Value::from("a"),
                Value::Int(1),
                Value::from("b"),
                Value::Float(2.5),
                Value::from("c"),
            ]
        );
    }

    #[test]
    fn test_level_macros() {
        let memory = Arc::new(MemoryWriter::new());
        let logger = Logger::with_writer(Arc::clone(&memory));
        logger.set_level(Level::Trace);

        trace!(logger, "t {}", 1).unwrap();
        debug!(logger, "d").unwrap();
        info!(logger, "i {}-{}", "a", 2).unwrap();
        warn!(logger, "w").unwrap();
        error!(logger, "e").unwrap();

        let messages: Vec<String> = memory.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["t 1", "d", "i a-2", "w", "e"]);
    }

    #[test]
    fn test_macros_accept_references_and_views() {
        let memory = Arc::new(MemoryWriter::new());
        let logger = Logger::with_writer(Arc::clone(&memory));
        let by_ref = &logger;
        let view = logger.tagged("view");

        info!(by_ref, "through a reference").unwrap();
        info!(view, "through a view").unwrap();

        let entries = memory.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tag.as_deref(), Some("view"));
    }

    #[test]
    fn test_fatal_macro_reports_termination() {
        let logger = Logger::with_writer(MemoryWriter::new());
        let outcome = fatal!(logger, "stopping").unwrap();
        assert_eq!(outcome, Outcome::Terminate(Termination::Exit { code: 1 }));
    }

    #[test]
    fn test_log_event_macro_gate() {
        let logger = Logger::with_writer(MemoryWriter::new());
        let outcome = log_event!(logger, Level::Debug, "hidden").unwrap();
        assert_eq!(outcome, Outcome::Suppressed);
    }
}
