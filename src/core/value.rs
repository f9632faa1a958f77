//! Field values
//!
//! [`Value`] is a closed set of variants. Renderers dispatch on the variant
//! instead of inspecting types at runtime, and [`ValueShape`] tells them
//! whether a value renders inline or as a multi-line block.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write as _};
use std::time::{Duration, SystemTime};

/// Rendering class of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar,
    List,
    Mapping,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Message of an error value
    Error(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Human-readable representation of a `Display` value
    Display(String),
    /// Generic textual representation of a `Debug` value
    Debug(String),
    List(Vec<Value>),
    /// Entries in rendering order
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Capture an error's message.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Value::Error(err.to_string())
    }

    /// Capture a value through its `Display` implementation.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Display(value.to_string())
    }

    /// Capture a value through its `Debug` implementation.
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::Debug(format!("{:?}", value))
    }

    /// Build a mapping that keeps the given entry order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            Value::List(_) => ValueShape::List,
            Value::Map(_) => ValueShape::Mapping,
            _ => ValueShape::Scalar,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// Short duration form: `0s`, `750ns`, `1.5µs`, `20ms`, `1.5s`, `1m30s`, `1h0m0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    let mut out = String::new();

    if nanos == 0 {
        out.push_str("0s");
    } else if nanos < 1_000 {
        let _ = write!(out, "{}ns", nanos);
    } else if nanos < 1_000_000 {
        push_fraction(&mut out, nanos / 1_000, nanos % 1_000, 3);
        out.push_str("µs");
    } else if nanos < 1_000_000_000 {
        push_fraction(&mut out, nanos / 1_000_000, nanos % 1_000_000, 6);
        out.push_str("ms");
    } else {
        let secs = d.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        if hours > 0 {
            let _ = write!(out, "{}h", hours);
        }
        if hours > 0 || minutes > 0 {
            let _ = write!(out, "{}m", minutes);
        }
        push_fraction(&mut out, u128::from(secs % 60), u128::from(d.subsec_nanos()), 9);
        out.push('s');
    }

    out
}

fn push_fraction(out: &mut String, whole: u128, rem: u128, digits: usize) {
    let _ = write!(out, "{}", whole);
    if rem > 0 {
        let frac = format!("{:0width$}", rem, width = digits);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Str(s) | Value::Error(s) | Value::Display(s) | Value::Debug(s) => {
                f.write_str(s)
            }
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::Time(t) => write!(f, "{}", t),
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(']')
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                f.write_char(']')
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_none(),
            Value::Str(s) | Value::Error(s) | Value::Display(s) | Value::Debug(s) => {
                serializer.serialize_str(s)
            }
            Value::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            Value::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&k.to_string(), v)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl From<SystemTime> for Value {
    fn from(v: SystemTime) -> Self {
        Value::Time(v.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::List(v.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::map(v)
    }
}

/// `HashMap` has no stable order; entries are sorted by the key's textual form.
impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        let mut entries: Vec<(Value, Value)> =
            v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        entries.sort_by_cached_key(|(k, _)| k.to_string());
        Value::Map(entries)
    }
}
