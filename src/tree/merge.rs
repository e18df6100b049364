//! Recursive merge of value trees
//!
//! - Mapping + mapping: merge by key (recursive)
//! - Anything else: overlay replaces base, sequences included

use serde_json::Value;

/// Deep merge `overlay` on top of `base`.
///
/// Keys present only in `base` survive untouched and keep their position;
/// keys new to `base` are appended in overlay order.
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let current = slot.take();
                        *slot = merge(current, overlay_value);
                    }
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
