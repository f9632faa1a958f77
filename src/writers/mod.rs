//! Writer implementations

pub mod json;
pub mod memory;
pub mod pretty;
pub mod render;
pub mod style;

pub use json::JsonWriter;
pub use memory::{CapturedRecord, MemoryWriter};
pub use pretty::PrettyWriter;
pub use render::PrettyFormatter;
pub use style::{PrettyStyles, Style};

pub use crate::core::{FanOut, Record, Writer};
