//! Total accessors over an untyped report tree.
//!
//! Every helper here answers "is this node the shape I want" with an
//! `Option`, never an error. A node of the wrong type is
//! indistinguishable from a missing one.

use serde_json::{Map, Value};

/// The node as a mapping, if it is one.
pub fn mapping(node: &Value) -> Option<&Map<String, Value>> {
    node.as_object()
}

/// The value under `key` as a sequence, if present and a sequence.
pub fn sequence<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    map.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// First non-empty string found under any of `aliases`, in order.
///
/// Only JSON strings count as text. Numbers, booleans, null and
/// containers under an alias are skipped like an absent key. Numbers
/// are never stringified: `{"issue": 5, "description": "x"}` yields `"x"`.
pub fn first_text<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}
