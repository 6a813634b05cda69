//! Bidirectional transposition of one-to-many comma-joined mappings.
//!
//! Pivots a `user -> "g1,g2"` JSON object into its `group -> "u1,u2"`
//! inverse (and back - the operation is self-inverse up to whitespace
//! and ordering normalization).

use serde_json::{Map, Value};

/// Invert a mapping of key to comma-joined values into a mapping of
/// value to comma-joined keys.
///
/// Every value string is split on commas with each piece trimmed; a
/// value referenced by several keys accumulates them in first-seen key
/// order. Returns `None` when the input is not a JSON object of
/// strings - callers treat that as a silent no-op, the deliberate
/// best-effort contract for a pipeline stage that may receive empty
/// input.
pub fn transpose(input: &Value) -> Option<Value> {
    let object = input.as_object()?;

    // serde_json is built with preserve_order, so insertion order of
    // the result map is the first-seen order required by the contract.
    let mut inverted = Map::new();
    for (key, value) in object {
        let value = value.as_str()?;
        for piece in value.split(',') {
            let piece = piece.trim();
            match inverted.entry(piece.to_string()) {
                serde_json::map::Entry::Occupied(mut entry) => {
                    if let Value::String(keys) = entry.get_mut() {
                        keys.push(',');
                        keys.push_str(key);
                    }
                }
                serde_json::map::Entry::Vacant(entry) => {
                    entry.insert(Value::String(key.clone()));
                }
            }
        }
    }
    Some(Value::Object(inverted))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use serde_json::json;

    use super::*;

    #[test]
    fn test_basic_inversion() {
        let input = json!({"u1": "g1, g2", "u2": "g2"});
        assert_eq!(
            transpose(&input),
            Some(json!({"g1": "u1", "g2": "u1,u2"}))
        );
    }

    #[test]
    fn test_first_seen_key_order_is_preserved() {
        let input = json!({"u3": "g1", "u1": "g1", "u2": "g1"});
        assert_eq!(transpose(&input), Some(json!({"g1": "u3,u1,u2"})));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let input = json!({"u1": "  g1 ,g2  "});
        assert_eq!(transpose(&input), Some(json!({"g1": "u1", "g2": "u1"})));
    }

    #[test]
    fn test_empty_object_transposes_to_empty_object() {
        assert_eq!(transpose(&json!({})), Some(json!({})));
    }

    #[test]
    fn test_non_object_input_is_a_no_op() {
        assert_eq!(transpose(&json!(["u1"])), None);
        assert_eq!(transpose(&json!("u1")), None);
        assert_eq!(transpose(&json!(42)), None);
        assert_eq!(transpose(&Value::Null), None);
    }

    #[test]
    fn test_non_string_value_is_a_no_op() {
        assert_eq!(transpose(&json!({"u1": ["g1"]})), None);
        assert_eq!(transpose(&json!({"u1": "g1", "u2": 7})), None);
    }

    /// Normalize an object into a comparable key -> value-set relation.
    fn relation(value: &Value) -> BTreeMap<String, BTreeSet<String>> {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| {
                let pieces = v
                    .as_str()
                    .unwrap()
                    .split(',')
                    .map(|p| p.trim().to_string())
                    .collect();
                (k.clone(), pieces)
            })
            .collect()
    }

    #[test]
    fn test_double_transposition_reproduces_the_relation() {
        let input = json!({
            "u1": "g1,g2",
            "u2": "g2,g3",
            "u3": "g1",
        });

        let once = transpose(&input).unwrap();
        let twice = transpose(&once).unwrap();

        assert_eq!(relation(&input), relation(&twice));
    }

    #[test]
    fn test_double_transposition_with_irregular_spacing() {
        // Formatting may differ after a round trip, the relation may not.
        let input = json!({"u1": " g1 , g2", "u2": "g2 "});

        let twice = transpose(&transpose(&input).unwrap()).unwrap();

        assert_eq!(relation(&input), relation(&twice));
    }
}
