//! Value tree helpers shared by the registry and the format parsers
//!
//! A value tree is a `serde_json::Value`: nested mappings, sequences and
//! scalars. Mapping order is insertion order.

pub mod coerce;
pub mod dotted;
pub mod merge;

use serde_json::{Map, Value};

pub use coerce::coerce_scalar;
pub use dotted::{expand_dotted, insert_dotted};
pub use merge::merge;

/// Sort mapping keys at every level of nesting.
///
/// Sequences keep their element order; their elements are sorted recursively.
pub fn sort_keys_recursive(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries.into_iter().map(|(k, v)| (k, sort_keys_recursive(v))).collect::<Map<_, _>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys_recursive).collect()),
        other => other,
    }
}
