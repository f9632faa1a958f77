//! Pretty line rendering
//!
//! One record becomes one line (plus indented blocks for collection
//! fields). Segment order is fixed: timestamp, level, caller, tag, message,
//! error, then the fields in three passes over the same list:
//!
//! 1. scalar fields inline as `key=value`
//! 2. list fields as a block with one `[00] item` line per element
//! 3. map fields as a block with one `[key] value` line per entry
//!
//! Each pass keeps attachment order among its own fields.

use super::style::{push_spaces, PrettyStyles};
use crate::core::event::Caller;
use crate::core::field::Field;
use crate::core::timestamp::TimestampFormat;
use crate::core::value::{format_duration, Value, ValueShape};
use crate::core::writer::Record;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Renders records as human-readable lines.
///
/// ```
/// use rust_event_logger::prelude::*;
/// use rust_event_logger::writers::PrettyFormatter;
///
/// let fields = [Field::new("n", 5)];
/// let record = Record::new(Level::Info, "hello")
///     .with_tag("svc")
///     .with_fields(&fields);
///
/// let line = PrettyFormatter::new()
///     .with_time_format(None)
///     .format(&record, chrono::Utc::now());
/// assert_eq!(line, "INFO  svc        hello n=5\n");
/// ```
#[derive(Debug, Clone)]
pub struct PrettyFormatter {
    styles: PrettyStyles,
    time_format: Option<TimestampFormat>,
    color: bool,
}

impl PrettyFormatter {
    /// RFC 3339 timestamps, default styles, no color.
    pub fn new() -> Self {
        Self {
            styles: PrettyStyles::default(),
            time_format: Some(TimestampFormat::Rfc3339),
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Format of the leading timestamp and of `Time` values. `None` drops
    /// the timestamp.
    #[must_use]
    pub fn with_time_format(mut self, format: Option<TimestampFormat>) -> Self {
        self.time_format = format;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: PrettyStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn styles(&self) -> &PrettyStyles {
        &self.styles
    }

    pub fn time_format(&self) -> Option<&TimestampFormat> {
        self.time_format.as_ref()
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self, record: &Record<'_>, now: DateTime<Utc>) -> String {
        let mut out = String::with_capacity(128);
        self.format_into(&mut out, record, now);
        out
    }

    /// Append the rendered record, newline included, to `out`.
    pub fn format_into(&self, out: &mut String, record: &Record<'_>, now: DateTime<Utc>) {
        let styles = &self.styles;
        let start = out.len();

        if let Some(format) = &self.time_format {
            styles.timestamp.paint(out, &format.format(&now), self.color);
        }

        separate(out, start);
        let level_color = styles.level.color.or(Some(record.level.color_code()));
        styles
            .level
            .paint_as(out, record.level.label(), level_color, self.color);

        if let Some(caller) = &record.caller {
            separate(out, start);
            styles.caller.paint(out, &self.format_caller(caller), self.color);
        }

        if let Some(tag) = record.tag.filter(|tag| !tag.is_empty()) {
            separate(out, start);
            styles.tag.paint(out, tag, self.color);
        }

        if !record.message.is_empty() {
            separate(out, start);
            styles.message.paint(out, record.message, self.color);
        }

        if let Some(err) = record.error {
            separate(out, start);
            styles.error_key.paint(out, "error=", self.color);
            styles
                .error_value
                .paint(out, &format!("\"{}\"", err), self.color);
        }

        self.write_fields(out, start, record.fields);
        out.push('\n');
    }

    fn write_fields(&self, out: &mut String, start: usize, fields: &[Field]) {
        let styles = &self.styles;

        for field in fields.iter().filter(|f| f.shape() == ValueShape::Scalar) {
            separate(out, start);
            styles.field_key.paint(out, &format!("{}=", field.key()), self.color);
            styles
                .field_value
                .paint(out, &self.value_string(field.value()), self.color);
        }

        for field in fields.iter().filter(|f| f.shape() == ValueShape::List) {
            self.block_key(out, field.key());
            if let Value::List(items) = field.value() {
                for (i, item) in items.iter().enumerate() {
                    self.block_line(out, &format!("[{:02}] {}", i, self.value_string(item)));
                }
            }
        }

        for field in fields.iter().filter(|f| f.shape() == ValueShape::Mapping) {
            self.block_key(out, field.key());
            if let Value::Map(entries) = field.value() {
                for (key, value) in entries {
                    let line = format!("[{}] {}", self.value_string(key), self.value_string(value));
                    self.block_line(out, &line);
                }
            }
        }
    }

    fn block_key(&self, out: &mut String, key: &Value) {
        out.push('\n');
        push_spaces(out, self.styles.block_indent);
        self.styles
            .field_key
            .paint(out, &format!("{}=", key), self.color);
    }

    fn block_line(&self, out: &mut String, text: &str) {
        out.push('\n');
        push_spaces(out, self.styles.block_indent);
        let mut border = [0u8; 4];
        self.styles.block_border.paint(
            out,
            self.styles.border.encode_utf8(&mut border),
            self.color,
        );
        out.push(' ');
        self.styles.field_value.paint(out, text, self.color);
    }

    /// Text of a single value.
    ///
    /// Precedence: strings, errors, durations, times, `Display` values,
    /// then the generic form. Only the generic form is unquoted.
    pub fn value_string(&self, value: &Value) -> String {
        match value {
            Value::Str(s) | Value::Error(s) => format!("\"{}\"", s),
            Value::Duration(d) => format_duration(*d),
            Value::Time(t) => match &self.time_format {
                Some(format) => format!("\"{}\"", format.format(t)),
                None => format!("\"{}\"", t),
            },
            Value::Display(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }

    /// `<file:line>` with the directory stripped, front-truncated with `…`
    /// to fit the caller column.
    pub fn format_caller(&self, caller: &Caller) -> String {
        let base = Path::new(caller.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(caller.file);
        let mut name = format!("{}:{}", base, caller.line);

        let max = self.styles.caller.width.saturating_sub(2);
        let len = name.chars().count();
        if max > 0 && len > max {
            let tail: String = name.chars().skip(len - (max - 1)).collect();
            name = format!("…{}", tail);
        }

        format!("<{}>", name)
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn separate(out: &mut String, start: usize) {
    if out.len() > start {
        out.push(' ');
    }
}
