//! Key/value field attached to an event

use super::pool::{Pool, Reset};
use super::value::{Value, ValueShape};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

pub(crate) static FIELD_POOL: Pool<Field> = Pool::new(Field::empty);

/// One attached key/value pair.
///
/// The value's shape is classified the first time a renderer asks for it
/// and cached until the field is reset. The cache is thread-safe, so
/// records can be shared with writer threads.
#[derive(Debug, Clone, Default)]
pub struct Field {
    key: Value,
    value: Value,
    shape: OnceLock<ValueShape>,
}

impl Field {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            shape: OnceLock::new(),
        }
    }

    fn empty() -> Self {
        Self::default()
    }

    /// Draw a field from `pool` and fill it.
    pub(crate) fn pooled(pool: &Pool<Field>, key: Value, value: Value) -> Self {
        let mut field = pool.get();
        field.key = key;
        field.value = value;
        field
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn shape(&self) -> ValueShape {
        *self.shape.get_or_init(|| self.value.shape())
    }

    #[cfg(test)]
    fn cached_shape(&self) -> Option<ValueShape> {
        self.shape.get().copied()
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Reset for Field {
    fn reset(&mut self) {
        self.key = Value::Null;
        self.value = Value::Null;
        self.shape.take();
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Field", 2)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}
