//! Nested JSON → flat `path/to/key` → text mapping

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Flattened files of one record section, keyed by slash-joined path.
pub type FileMap = BTreeMap<String, String>;

/// Objects nested deeper than this are kept as a single pretty-printed leaf.
pub const MAX_DEPTH: usize = 64;

/// Flatten `value` under `prefix`.
///
/// - null → empty
/// - scalar → one entry at `prefix` (or `"value"`)
/// - array → one pretty-printed entry at `prefix` (or `"array"`); arrays are leaves
/// - object → walked; nested objects extend the path, everything else is a leaf
///
/// Colliding paths are last-write-wins.
pub fn flatten(value: &Value, prefix: &str) -> FileMap {
    let mut out = FileMap::new();
    match value {
        Value::Null => {}
        Value::Array(_) => {
            out.insert(key_or(prefix, "array"), pretty(value));
        }
        Value::Object(map) => walk(map, prefix, &mut out),
        scalar => {
            out.insert(key_or(prefix, "value"), scalar_text(scalar));
        }
    }
    out
}

fn walk(root: &Map<String, Value>, prefix: &str, out: &mut FileMap) {
    // Explicit stack of (path, remaining entries, depth); children are visited
    // in the same order a recursive walk would visit them.
    let mut stack = vec![(prefix.to_string(), root.iter(), 1usize)];

    loop {
        let next = match stack.last_mut() {
            Some((path, entries, depth)) => entries.next().map(|(k, v)| (join(path, k), v, *depth)),
            None => break,
        };
        let Some((path, value, depth)) = next else {
            stack.pop();
            continue;
        };

        match value {
            Value::Null => {
                out.insert(path, "null".to_string());
            }
            Value::Object(inner) if depth < MAX_DEPTH => {
                stack.push((path, inner.iter(), depth + 1));
            }
            Value::Object(_) | Value::Array(_) => {
                out.insert(path, pretty(value));
            }
            scalar => {
                out.insert(path, scalar_text(scalar));
            }
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}/{key}")
    }
}

fn key_or(prefix: &str, fallback: &str) -> String {
    if prefix.is_empty() {
        fallback.to_string()
    } else {
        prefix.to_string()
    }
}

/// Strings verbatim, other scalars as their JSON text.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Two-space indented JSON.
pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("input", "a"), "input/a");
    }

    #[test]
    fn test_depth_cap_keeps_deep_subtree_as_leaf() {
        let mut deep = json!("bottom");
        for _ in 0..(MAX_DEPTH + 5) {
            deep = json!({ "n": deep });
        }

        let flat = flatten(&deep, "");
        assert_eq!(flat.len(), 1);

        let (key, value) = flat.iter().next().unwrap();
        assert_eq!(key.split('/').count(), MAX_DEPTH);
        assert!(value.starts_with('{'));
        assert!(value.contains("bottom"));
    }
}
