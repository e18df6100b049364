//! Dotted-key expansion: `a.b.c = v` becomes `{a: {b: {c: v}}}`.

use super::merge::merge;
use serde_json::{Map, Value};

/// Build the nested tree for a single dotted key.
///
/// The tree is built from the innermost segment outwards, so key depth never
/// grows the call stack.
pub fn expand_dotted(key: &str, value: Value) -> Value {
    let segments: Vec<&str> = key.split('.').collect();
    let mut node = value;
    for index in (0..segments.len()).rev() {
        let mut parent = Map::new();
        parent.insert(segments[index].to_string(), node);
        node = Value::Object(parent);
    }
    node
}

/// Expand `key` and merge it into `target`, later keys winning on conflicts.
pub fn insert_dotted(target: &mut Map<String, Value>, key: &str, value: Value) {
    let Value::Object(expanded) = expand_dotted(key, value) else {
        return;
    };
    for (head, subtree) in expanded {
        let merged = match target.get_mut(&head) {
            Some(existing) => merge(existing.take(), subtree),
            None => subtree,
        };
        target.insert(head, merged);
    }
}
