//! Severity levels
//!
//! Levels are ordered from most to least severe: `Panic`, `Fatal`, `Error`,
//! `Warn`, `Info`, `Debug`, `Trace`. `Off` and `All` are sentinels used as a
//! logger's minimum level: `Off` lets nothing through, `All` lets everything
//! through.

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    Off = 0,
    Panic = 1,
    Fatal = 2,
    Error = 3,
    Warn = 4,
    #[default]
    Info = 5,
    Debug = 6,
    Trace = 7,
    All = 8,
}

impl Level {
    /// The seven severities events can be created at, most severe first.
    pub const SEVERITIES: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Lowercase name, as used in configuration and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            Level::Off => "off",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
            Level::All => "all",
        }
    }

    /// Uppercase marker used by the pretty renderer
    pub fn label(&self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::All => "ALL",
        }
    }

    /// Numeric rank, `1` (panic) to `7` (trace)
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// True for the seven real severities, false for the `Off`/`All` sentinels.
    pub fn is_severity(&self) -> bool {
        !matches!(self, Level::Off | Level::All)
    }

    /// Level gate: does a logger configured with `self` as its minimum
    /// emit an event at `event`?
    ///
    /// Events created at a sentinel level are never emitted.
    pub fn allows(&self, event: Level) -> bool {
        event.is_severity() && event <= *self
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Panic => BrightMagenta,
            Level::Fatal => Magenta,
            Level::Error => BrightRed,
            Level::Warn => Yellow,
            Level::Info => BrightGreen,
            Level::Debug => Blue,
            Level::Trace => Cyan,
            Level::Off | Level::All => White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "panic" | "pnc" | "p" | "1" => Ok(Level::Panic),
            "fatal" | "ftl" | "f" | "2" => Ok(Level::Fatal),
            "error" | "err" | "e" | "3" => Ok(Level::Error),
            "warn" | "wrn" | "w" | "4" => Ok(Level::Warn),
            "info" | "inf" | "i" | "5" => Ok(Level::Info),
            "debug" | "dbg" | "d" | "6" => Ok(Level::Debug),
            "trace" | "trc" | "t" | "7" => Ok(Level::Trace),
            "off" => Ok(Level::Off),
            "all" => Ok(Level::All),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
