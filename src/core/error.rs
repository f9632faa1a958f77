//! Error types for the event logger

use super::event::Termination;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),

    /// Write attempted after the writer released its output
    #[error("Writer '{writer}' is closed")]
    WriterClosed { writer: String },

    /// Level string not present in the level table
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A global `log` logger was already installed
    #[error("Failed to install log bridge: {0}")]
    SetLogger(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer closed error
    pub fn writer_closed(writer: impl Into<String>) -> Self {
        LoggerError::WriterClosed {
            writer: writer.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Failed commit.
///
/// Carries the writer failure and, for Fatal and Panic events that passed
/// the level gate, the termination the event still requests. The event
/// that produced it keeps its data and can be committed again.
#[derive(Debug, thiserror::Error)]
#[error("failed to commit log event")]
pub struct CommitError {
    #[source]
    pub source: LoggerError,
    pub termination: Option<Termination>,
}

impl CommitError {
    pub(crate) fn new(source: LoggerError, termination: Option<Termination>) -> Self {
        Self {
            source,
            termination,
        }
    }

    /// Terminate if the failed event requested it, otherwise hand the error back.
    pub fn enforce(self) -> Self {
        if let Some(termination) = self.termination {
            termination.enforce();
        }
        self
    }
}

impl From<LoggerError> for CommitError {
    fn from(source: LoggerError) -> Self {
        CommitError::new(source, None)
    }
}

impl From<CommitError> for LoggerError {
    fn from(err: CommitError) -> Self {
        err.source
    }
}
