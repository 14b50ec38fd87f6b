//! Dotted property paths.
//!
//! Two path flavors share the dot-separated syntax:
//!
//! - **Shape paths** drive nested casting. Segments are split on `.` with
//!   empty and bare-`.` segments discarded, and may contain the wildcards
//!   `*` (every element of a sequence) and `{}` (every own key of an object).
//! - **Unwrap paths** locate the real payload inside a response envelope.
//!   A single-segment path falls back to the envelope itself when the
//!   property is absent; a multi-segment path descends greedily.

use crate::error::CastError;
use serde_json::Value;

/// Splits a shape path into its segments, discarding empty and `.`-only
/// segments (`"a..b."` parses the same as `"a.b"`).
pub(crate) fn split_shape_path(path: &str) -> Vec<&str> {
    path.split('.')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Resolves an unwrap path against a response envelope.
///
/// Unwrapping only applies to object envelopes; arrays and scalars are
/// returned untouched. A single-segment path takes the named property if the
/// envelope owns it and the envelope itself otherwise. A multi-segment path
/// descends one property per segment: a missing or non-object intermediate
/// is a [`CastError::UnwrapPath`], while a missing final segment resolves to
/// null so the caller can pass it through uncast.
pub(crate) fn resolve_unwrap(envelope: Value, path: &str) -> Result<Value, CastError> {
    if !envelope.is_object() {
        return Ok(envelope);
    }

    let segments: Vec<&str> = path.split('.').collect();

    if segments.len() == 1 {
        return Ok(match envelope {
            Value::Object(mut map) => match map.remove(path) {
                Some(payload) => payload,
                None => Value::Object(map),
            },
            other => other,
        });
    }

    let last = segments.len() - 1;
    let mut current = envelope;
    for (depth, segment) in segments.into_iter().enumerate() {
        let child = match current {
            Value::Object(mut map) => map.remove(segment),
            _ => None,
        };
        current = match child {
            Some(value) => value,
            None if depth == last => Value::Null,
            None => {
                return Err(CastError::UnwrapPath {
                    path: path.to_string(),
                    segment: segment.to_string(),
                })
            }
        };
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_discards_empty_segments() {
        assert_eq!(split_shape_path("a.b.*"), vec!["a", "b", "*"]);
        assert_eq!(split_shape_path("a..b."), vec!["a", "b"]);
        assert_eq!(split_shape_path("{}.*"), vec!["{}", "*"]);
        assert!(split_shape_path("").is_empty());
    }

    #[test]
    fn test_single_segment_takes_owned_property() {
        let envelope = json!({"data": {"id": 1}});
        let payload = resolve_unwrap(envelope, "data").unwrap();
        assert_eq!(payload, json!({"id": 1}));
    }

    #[test]
    fn test_single_segment_falls_back_to_envelope() {
        let envelope = json!({"other": {"id": 1}});
        let payload = resolve_unwrap(envelope, "data").unwrap();
        assert_eq!(payload, json!({"other": {"id": 1}}));
    }

    #[test]
    fn test_multi_segment_descends() {
        let envelope = json!({"a": {"b": {"id": 1}}});
        let payload = resolve_unwrap(envelope, "a.b").unwrap();
        assert_eq!(payload, json!({"id": 1}));
    }

    #[test]
    fn test_broken_intermediate_segment_is_an_error() {
        let envelope = json!({"a": {"b": {"id": 1}}});
        let err = resolve_unwrap(envelope, "x.b").unwrap_err();
        match err {
            CastError::UnwrapPath { path, segment } => {
                assert_eq!(path, "x.b");
                assert_eq!(segment, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_final_segment_resolves_to_null() {
        let envelope = json!({"a": {"b": {"id": 1}}});
        let payload = resolve_unwrap(envelope, "a.missing").unwrap();
        assert_eq!(payload, Value::Null);
    }

    #[test]
    fn test_non_object_intermediate_is_an_error() {
        let envelope = json!({"a": "scalar"});
        let err = resolve_unwrap(envelope, "a.b.c").unwrap_err();
        assert!(matches!(err, CastError::UnwrapPath { .. }));
    }

    #[test]
    fn test_scalar_at_final_lookup_resolves_to_null() {
        let envelope = json!({"a": "scalar"});
        let payload = resolve_unwrap(envelope, "a.b").unwrap();
        assert_eq!(payload, Value::Null);
    }

    #[test]
    fn test_array_envelope_passes_through() {
        let envelope = json!([{"id": 1}]);
        let payload = resolve_unwrap(envelope, "rs").unwrap();
        assert_eq!(payload, json!([{"id": 1}]));
    }
}
