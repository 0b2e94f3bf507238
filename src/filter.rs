//! Path extraction and field matching over a fetched JSON document.

use serde_json::Value;

use crate::error::{Result, SearchError};
use crate::types::ResultSet;

/// Run the whole filter pass: extract `path`, check the shape, match `field` against `query`.
pub fn filter(dataset: &Value, path: &str, field: &str, query: &str) -> Result<ResultSet> {
    let collection = extract(dataset, path)?;
    let items = as_records(collection, path)?;
    match_records(items, field, query)
}

/// Descend `dataset` along a dot-separated path. An empty path is the root.
///
/// Object segments are keys, array segments are decimal indexes. A segment
/// that does not resolve, or a path ending on `null`, fails with the full path.
pub fn extract<'a>(dataset: &'a Value, path: &str) -> Result<&'a Value> {
    if path.is_empty() {
        return Ok(dataset);
    }

    let not_found = || SearchError::PathNotFound { path: path.to_string() };
    let target = path
        .split('.')
        .try_fold(dataset, |value, key| child(value, key))
        .ok_or_else(not_found)?;

    if target.is_null() {
        return Err(not_found());
    }
    Ok(target)
}

/// The extracted value must be a list; anything else is a shape failure.
pub fn as_records<'a>(value: &'a Value, path: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| SearchError::Shape { path: path.to_string() })
}

/// Keep the items whose `field` contains `query`, ignoring case.
///
/// All or nothing: if any item is not an object with a string `field`,
/// the whole pass fails and no partial matches are returned.
pub fn match_records(items: &[Value], field: &str, query: &str) -> Result<ResultSet> {
    let query = query.to_lowercase();
    let mut matched = ResultSet::new();

    for item in items {
        let record = item
            .as_object()
            .ok_or_else(|| SearchError::FieldAccess { field: field.to_string() })?;
        let text = record
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::FieldAccess { field: field.to_string() })?;

        if text_matches(&text.to_lowercase(), &query) {
            matched.push(record.clone());
        }
    }

    Ok(matched)
}

// Both sides are expected to be case-normalized already.
pub fn text_matches(text: &str, query: &str) -> bool {
    text.contains(query)
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(arr) => parse_index(key).and_then(|i| arr.get(i)),
        _ => None,
    }
}

// Canonical decimal only: "0", "12"; not "+1", "01" or "".
fn parse_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}
