//! Configuration path handling
//!
//! Paths are entered as one string with single spaces between segments,
//! e.g. `"system host-name"`. There is no quoting or escaping, so a segment
//! can never contain a space.

use serde_json::Value;

/// Split a space-delimited path into its segments
///
/// Empty segments are dropped, so `""` is the root path.
pub fn split_path(path: &str) -> Vec<String> {
    path.split(' ')
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Narrow a retrieval result to the leaf named by the last path segment
///
/// If `data` is a mapping with a key equal to the last segment, that value
/// is returned on its own. Otherwise `data` is returned unchanged. A node
/// with a child named like itself is unwrapped all the same.
pub fn unwrap_show_path(data: Value, segments: &[String]) -> Value {
    let Some(last) = segments.last() else {
        return data;
    };

    match data {
        Value::Object(mut map) => match map.remove(last) {
            Some(value) => value,
            None => Value::Object(map),
        },
        other => other,
    }
}
