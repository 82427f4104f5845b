//! Value module - In-memory representation of decoded JSON/YAML documents.

mod value;

pub use value::*;
