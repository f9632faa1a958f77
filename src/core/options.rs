//! Declarative logger configuration
//!
//! [`LoggerOptions`] deserializes from any serde format and builds a ready
//! [`Logger`]. Every field has a default, so partial documents work:
//!
//! ```
//! use rust_event_logger::core::{Level, LoggerOptions};
//!
//! let options = LoggerOptions::from_json(r#"{"level": "dbg", "tag": "api"}"#).unwrap();
//! assert_eq!(options.level, Level::Debug);
//!
//! let logger = options.build().unwrap();
//! assert_eq!(logger.default_tag().as_deref(), Some("api"));
//! ```

use super::error::{LoggerError, Result};
use super::level::Level;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use super::writer::Writer;
use crate::writers::{JsonWriter, PrettyWriter};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the built logger writes. Files are opened in append mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Minimum level, accepts every form of the level table
    pub level: Level,
    pub caller: bool,
    pub tag: Option<String>,
    pub format: OutputFormat,
    pub target: OutputTarget,
    /// Only affects pretty output on stdout/stderr; files are never colored
    pub no_color: bool,
    /// `None` omits timestamps
    pub timestamp: Option<TimestampFormat>,
    pub enforce_termination: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: Level::Info,
            caller: false,
            tag: None,
            format: OutputFormat::Pretty,
            target: OutputTarget::Stdout,
            no_color: false,
            timestamp: Some(TimestampFormat::Rfc3339),
            enforce_termination: false,
        }
    }
}

impl LoggerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let OutputTarget::File(path) = &self.target {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("target", "file path is empty"));
            }
        }
        if matches!(self.tag.as_deref(), Some(tag) if tag.trim().is_empty()) {
            return Err(LoggerError::config("tag", "tag is blank"));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Logger> {
        self.validate()?;

        let mut builder = Logger::builder()
            .min_level(self.level)
            .caller(self.caller)
            .enforce_termination(self.enforce_termination)
            .shared_writer(self.writer()?);
        if let Some(tag) = &self.tag {
            builder = builder.tag(tag.clone());
        }
        Ok(builder.build())
    }

    fn writer(&self) -> Result<Arc<dyn Writer>> {
        let writer = match (&self.format, &self.target) {
            (OutputFormat::Pretty, OutputTarget::Stdout) => {
                self.pretty(PrettyWriter::stdout().with_no_color(self.no_color))
            }
            (OutputFormat::Pretty, OutputTarget::Stderr) => {
                self.pretty(PrettyWriter::stderr().with_no_color(self.no_color))
            }
            (OutputFormat::Pretty, OutputTarget::File(path)) => {
                self.pretty(PrettyWriter::file(path)?)
            }
            (OutputFormat::Json, OutputTarget::Stdout) => self.json(JsonWriter::stdout()),
            (OutputFormat::Json, OutputTarget::Stderr) => self.json(JsonWriter::stderr()),
            (OutputFormat::Json, OutputTarget::File(path)) => self.json(JsonWriter::file(path)?),
        };
        Ok(writer)
    }

    fn pretty<W: Write + Send + 'static>(&self, writer: PrettyWriter<W>) -> Arc<dyn Writer> {
        Arc::new(writer.with_time_format(self.timestamp.clone()))
    }

    fn json<W: Write + Send + 'static>(&self, writer: JsonWriter<W>) -> Arc<dyn Writer> {
        Arc::new(writer.with_time_format(self.timestamp.clone()))
    }
}
