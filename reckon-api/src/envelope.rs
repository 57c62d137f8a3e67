//! Server envelope normalization.
//!
//! The backend wraps most payloads as `{ "data": <payload> }`, but not all of
//! them, and the payload itself may be a list, a single object, or an object
//! nesting named collections (`{"data": {"tickets": [...]}}`). These helpers
//! decide the shape exactly once at the response boundary so call sites can
//! pattern-match instead of re-deriving it.
//!
//! `unwrap_data` must be applied exactly once per response. That is a usage
//! contract: an already-unwrapped payload that happens to contain its own
//! `data` member would be unwrapped again.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Strip the `{data: ...}` envelope if present, otherwise return the value
/// unchanged.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Unwrap the envelope, then pull `key` out of a nested object payload.
///
/// Lists ignore the key - `extract({data: [1,2,3]}, Some("anything"))` is the
/// list itself. A key missing from a nested payload falls back to the whole
/// unwrapped value rather than failing, matching the tolerant behavior the
/// backend's consumers rely on.
pub fn extract(value: Value, key: Option<&str>) -> Value {
    let unwrapped = unwrap_data(value);
    let Some(key) = key else {
        return unwrapped;
    };
    match unwrapped {
        Value::Object(mut map) => match map.remove(key) {
            Some(member) => member,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Unwrap the envelope and deserialize into the caller's type.
pub fn decode<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    serde_json::from_value(unwrap_data(value))
}

/// Unwrap the envelope, pull `key` from nested payloads, and deserialize.
pub fn decode_member<T: DeserializeOwned>(value: Value, key: &str) -> serde_json::Result<T> {
    serde_json::from_value(extract(value, Some(key)))
}

// ============================================================================
// SHAPE CLASSIFICATION
// ============================================================================

/// Payload shape, decided once at the response boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A homogeneous list: `[...]`
    List(Vec<Value>),
    /// An object nesting named collections: `{"tickets": [...], "total": 3}`
    Nested(Map<String, Value>),
    /// A single resource, recognized by a truthy `id` member
    Single(Map<String, Value>),
    /// Anything else (scalars, null, objects without an id)
    Other(Value),
}

/// Classify an already-unwrapped payload.
pub fn classify(value: Value) -> Payload {
    match value {
        Value::Array(items) => Payload::List(items),
        Value::Object(map) => {
            if map.get("id").is_some_and(is_truthy) {
                Payload::Single(map)
            } else {
                Payload::Nested(map)
            }
        }
        other => Payload::Other(other),
    }
}

/// `true` for list payloads.
pub fn is_list(value: &Value) -> bool {
    value.is_array()
}

/// `true` for object payloads that nest named collections (no truthy `id`).
pub fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.get("id").is_some_and(is_truthy),
        _ => false,
    }
}

/// `true` for a single resource: a non-array object with a truthy `id`.
pub fn is_single_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.get("id").is_some_and(is_truthy),
        _ => false,
    }
}

/// JavaScript truthiness, which is what the backend's original consumers
/// applied to the `id` member: null, false, 0, and "" are falsy; arrays and
/// objects are always truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_strips_data_envelope_from_nested_object() {
        let value = json!({"data": {"products": [1, 2]}});
        assert_eq!(unwrap_data(value), json!({"products": [1, 2]}));
    }

    #[test]
    fn unwrap_strips_data_envelope_from_list() {
        let value = json!({"data": [1, 2, 3]});
        assert_eq!(unwrap_data(value), json!([1, 2, 3]));
    }

    #[test]
    fn unwrap_leaves_bare_payload_unchanged() {
        let value = json!({"products": [1, 2]});
        assert_eq!(unwrap_data(value.clone()), value);
    }

    #[test]
    fn unwrap_passes_scalars_through() {
        assert_eq!(unwrap_data(json!(42)), json!(42));
        assert_eq!(unwrap_data(json!(null)), json!(null));
    }

    #[test]
    fn extract_pulls_named_member_from_nested_payload() {
        let value = json!({"data": {"products": [1, 2]}});
        assert_eq!(extract(value, Some("products")), json!([1, 2]));
    }

    #[test]
    fn extract_ignores_key_for_list_payloads() {
        let value = json!({"data": [1, 2, 3]});
        assert_eq!(extract(value, Some("anything")), json!([1, 2, 3]));
    }

    #[test]
    fn extract_without_key_is_plain_unwrap() {
        let value = json!({"data": {"a": 1}});
        assert_eq!(extract(value, None), json!({"a": 1}));
    }

    #[test]
    fn extract_missing_key_returns_whole_payload() {
        let value = json!({"data": {"a": 1}});
        assert_eq!(extract(value, Some("b")), json!({"a": 1}));
    }

    #[test]
    fn decode_member_reads_nested_collection() {
        let value = json!({"data": {"ids": [4, 5, 6]}});
        let ids: Vec<i64> = decode_member(value, "ids").unwrap();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[test]
    fn decode_handles_enveloped_and_bare_lists_alike() {
        let enveloped: Vec<i64> = decode(json!({"data": [1, 2]})).unwrap();
        let bare: Vec<i64> = decode(json!([1, 2])).unwrap();
        assert_eq!(enveloped, bare);
    }

    #[test]
    fn classify_list() {
        assert_eq!(
            classify(json!([1, 2])),
            Payload::List(vec![json!(1), json!(2)])
        );
        assert!(is_list(&json!([])));
    }

    #[test]
    fn classify_single_requires_truthy_id() {
        assert!(matches!(
            classify(json!({"id": 7, "subject": "till down"})),
            Payload::Single(_)
        ));
        // id 0, null or "" is falsy, so these are nested payloads
        assert!(matches!(classify(json!({"id": 0})), Payload::Nested(_)));
        assert!(matches!(classify(json!({"id": null})), Payload::Nested(_)));
        assert!(matches!(classify(json!({"id": ""})), Payload::Nested(_)));
    }

    #[test]
    fn classify_nested() {
        assert!(matches!(
            classify(json!({"tickets": [], "total": 0})),
            Payload::Nested(_)
        ));
        assert!(is_nested(&json!({"tickets": []})));
        assert!(!is_nested(&json!({"id": 3})));
    }

    #[test]
    fn predicates_are_mutually_exclusive_over_objects_and_arrays() {
        for value in [
            json!([1]),
            json!({"id": 9}),
            json!({"collections": {}}),
        ] {
            let hits = [is_list(&value), is_nested(&value), is_single_object(&value)]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(hits, 1, "value {value} matched {hits} predicates");
        }
    }
}
