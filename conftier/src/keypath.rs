//! Dotted key paths over YAML mappings.
//!
//! A key path such as `server.tls.port` addresses a value by descending
//! through nested mappings one segment at a time. Segments are plain string
//! keys; there is no escaping and no index syntax for sequences.

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Splits a dotted path into its segments.
///
/// Returns `None` if the path is empty or contains an empty segment
/// (`"a..b"`, `".a"`, `"a."`).
///
/// # Examples
///
/// ```
/// use conftier::keypath::segments;
///
/// assert_eq!(segments("a.b.c"), Some(vec!["a", "b", "c"]));
/// assert_eq!(segments("a..b"), None);
/// assert_eq!(segments(""), None);
/// ```
#[must_use]
pub fn segments(path: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Joins a parent path and a key into a dotted path.
///
/// # Examples
///
/// ```
/// use conftier::keypath::join;
///
/// assert_eq!(join("", "server"), "server");
/// assert_eq!(join("server", "port"), "server.port");
/// ```
#[must_use]
pub fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Renders a mapping key for use in a dotted path.
///
/// String keys are used as-is; other scalar keys are rendered through YAML.
#[must_use]
pub fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "<key>".to_string()),
    }
}

/// Looks up the value at a dotted path.
///
/// # Errors
///
/// Returns [`Error::KeyNotFound`] if the path is malformed, if any segment is
/// missing, or if an intermediate segment is not a mapping.
///
/// # Examples
///
/// ```
/// use conftier::keypath::lookup;
/// use serde_yaml::{Mapping, Value};
///
/// let root: Mapping = serde_yaml::from_str("server:\n  port: 8080\n").unwrap();
/// assert_eq!(lookup(&root, "server.port").unwrap(), &Value::from(8080));
/// assert!(lookup(&root, "server.host").is_err());
/// ```
pub fn lookup<'a>(root: &'a Mapping, path: &str) -> Result<&'a Value> {
    let parts = segments(path).ok_or_else(|| not_found(path))?;
    descend(root, &parts).ok_or_else(|| not_found(path))
}

fn descend<'a>(mapping: &'a Mapping, parts: &[&str]) -> Option<&'a Value> {
    let (first, rest) = parts.split_first()?;
    let value = mapping.get(*first)?;
    if rest.is_empty() {
        return Some(value);
    }
    match value {
        Value::Mapping(nested) => descend(nested, rest),
        _ => None,
    }
}

/// Builds a nested mapping holding `value` at `path`.
///
/// `nest("a.b", 1)` produces `{a: {b: 1}}`, which can then be deep-merged
/// into an existing configuration.
///
/// # Errors
///
/// Returns a validation error if the path is empty or has an empty segment.
///
/// # Examples
///
/// ```
/// use conftier::keypath::nest;
/// use serde_yaml::Value;
///
/// let patch = nest("logging.level", Value::from("debug")).unwrap();
/// assert_eq!(serde_yaml::to_string(&patch).unwrap(), "logging:\n  level: debug\n");
/// ```
pub fn nest(path: &str, value: Value) -> Result<Mapping> {
    let parts = segments(path)
        .ok_or_else(|| Error::validation(path, "key path must be non-empty dot-separated segments"))?;

    let mut current = value;
    for part in parts.iter().rev() {
        let mut level = Mapping::new();
        level.insert(Value::from(*part), current);
        current = Value::Mapping(level);
    }

    match current {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(Error::validation(path, "key path produced no mapping")),
    }
}

fn not_found(path: &str) -> Error {
    Error::KeyNotFound {
        key: path.to_string(),
    }
}
