//! Human-readable writer

use super::render::PrettyFormatter;
use super::style::PrettyStyles;
use crate::core::error::{LoggerError, Result};
use crate::core::timestamp::TimestampFormat;
use crate::core::writer::{Record, Writer};
use chrono::Utc;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

struct Output<W> {
    sink: W,
    /// Reused line buffer
    buf: String,
}

/// Writes records through a [`PrettyFormatter`] to any `io::Write`.
///
/// The sink and the line buffer sit behind one lock that is held while a
/// record is formatted and emitted, so lines from concurrent commits never
/// interleave.
pub struct PrettyWriter<W: Write + Send> {
    formatter: PrettyFormatter,
    output: Mutex<Option<Output<W>>>,
}

impl PrettyWriter<io::Stdout> {
    /// Colored output on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_no_color(false)
    }
}

impl PrettyWriter<io::Stderr> {
    /// Colored output on stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_no_color(false)
    }
}

impl PrettyWriter<BufWriter<File>> {
    /// Append uncolored lines to the file at `path`, creating it if needed.
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

impl<W: Write + Send> PrettyWriter<W> {
    /// Uncolored output on `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            formatter: PrettyFormatter::new(),
            output: Mutex::new(Some(Output {
                sink,
                buf: String::with_capacity(256),
            })),
        }
    }

    #[must_use]
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.formatter = std::mem::take(&mut self.formatter).with_color(!no_color);
        self
    }

    /// `None` drops the leading timestamp.
    #[must_use]
    pub fn with_time_format(mut self, format: Option<TimestampFormat>) -> Self {
        self.formatter = std::mem::take(&mut self.formatter).with_time_format(format);
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: PrettyStyles) -> Self {
        self.formatter = std::mem::take(&mut self.formatter).with_styles(styles);
        self
    }

    pub fn formatter(&self) -> &PrettyFormatter {
        &self.formatter
    }

    /// Take the sink back, `None` if the writer was closed.
    pub fn into_inner(self) -> Option<W> {
        let output = self.output.lock().take();
        output.map(|output| output.sink)
    }
}

impl<W: Write + Send> Writer for PrettyWriter<W> {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        let mut guard = self.output.lock();
        let output = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer_closed(self.name()))?;

        output.buf.clear();
        self.formatter
            .format_into(&mut output.buf, record, Utc::now());
        output
            .sink
            .write_all(output.buf.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing", "pretty record", e))
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
        "pretty"
    }
}

impl<W: Write + Send> Drop for PrettyWriter<W> {
    fn drop(&mut self) {
        if let Some(output) = self.output.get_mut().as_mut() {
            if let Err(e) = output.sink.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush pretty writer on drop: {}", e);
            }
        }
    }
}
