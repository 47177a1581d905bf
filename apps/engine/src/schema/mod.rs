//! Response-shape descriptors for structured generation.
//!
//! Every Gemini call pins a `Schema` on the request
//! (`generationConfig.responseSchema`) and re-checks the decoded payload
//! against the same tree before it is released to the caller. A value that
//! reaches a caller has always passed `Schema::validate`.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

pub mod catalog;

/// One node of a JSON shape: object, array, string, or integer.
///
/// Descriptors are built once at startup (see [`catalog`]) and never mutated,
/// so concurrent readers need no synchronization.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Object with named properties. Declaration order doubles as the
    /// `propertyOrdering` hint serialized to the API; validation ignores it.
    Object {
        description: Option<&'static str>,
        properties: Vec<(&'static str, Schema)>,
    },
    Array {
        description: Option<&'static str>,
        items: Box<Schema>,
    },
    String {
        description: Option<&'static str>,
        /// Closed set of allowed values, serialized as `enum`.
        allowed: Option<Vec<&'static str>>,
    },
    Integer {
        description: Option<&'static str>,
    },
}

impl Schema {
    /// Checks `value` against this shape. Returns the first violation as a
    /// dotted path plus reason. Extra keys on objects are tolerated; missing
    /// declared keys are not.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.check(value, "$")
    }

    fn check(&self, value: &Value, path: &str) -> Result<(), String> {
        match self {
            Schema::Object { properties, .. } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| format!("{path}: expected object"))?;
                for (name, schema) in properties {
                    let child = obj
                        .get(*name)
                        .ok_or_else(|| format!("{path}.{name}: missing required field"))?;
                    schema.check(child, &format!("{path}.{name}"))?;
                }
                Ok(())
            }
            Schema::Array { items, .. } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("{path}: expected array"))?;
                for (i, element) in arr.iter().enumerate() {
                    items.check(element, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            Schema::String { allowed, .. } => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("{path}: expected string"))?;
                if let Some(values) = allowed {
                    if !values.contains(&s) {
                        return Err(format!("{path}: '{s}' is not one of the allowed values"));
                    }
                }
                Ok(())
            }
            Schema::Integer { .. } => {
                if value.as_i64().is_none() && value.as_u64().is_none() {
                    return Err(format!("{path}: expected integer"));
                }
                Ok(())
            }
        }
    }
}

// Serialized by hand so object properties come out in declaration order and
// `propertyOrdering` is derived from the same list — the two can never drift.
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Schema::Object {
                description,
                properties,
            } => {
                map.serialize_entry("type", "OBJECT")?;
                if let Some(d) = description {
                    map.serialize_entry("description", d)?;
                }
                map.serialize_entry("properties", &Properties(properties))?;
                let ordering: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
                map.serialize_entry("propertyOrdering", &ordering)?;
            }
            Schema::Array { description, items } => {
                map.serialize_entry("type", "ARRAY")?;
                if let Some(d) = description {
                    map.serialize_entry("description", d)?;
                }
                map.serialize_entry("items", items)?;
            }
            Schema::String {
                description,
                allowed,
            } => {
                map.serialize_entry("type", "STRING")?;
                if let Some(d) = description {
                    map.serialize_entry("description", d)?;
                }
                if let Some(values) = allowed {
                    map.serialize_entry("enum", values)?;
                }
            }
            Schema::Integer { description } => {
                map.serialize_entry("type", "INTEGER")?;
                if let Some(d) = description {
                    map.serialize_entry("description", d)?;
                }
            }
        }
        map.end()
    }
}

/// Serializes the property list as a JSON object in declaration order.
struct Properties<'a>(&'a [(&'static str, Schema)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Schema {
        Schema::Object {
            description: None,
            properties: vec![
                (
                    "score",
                    Schema::Integer {
                        description: Some("1-100"),
                    },
                ),
                (
                    "tags",
                    Schema::Array {
                        description: None,
                        items: Box::new(Schema::String {
                            description: None,
                            allowed: None,
                        }),
                    },
                ),
                (
                    "verdict",
                    Schema::String {
                        description: None,
                        allowed: Some(vec!["improvement", "strength"]),
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_serializes_to_wire_format_with_property_ordering() {
        let wire = serde_json::to_string(&sample()).unwrap();
        assert!(wire.contains(r#""type":"OBJECT""#));
        assert!(wire.contains(r#""type":"INTEGER""#));
        assert!(wire.contains(r#""propertyOrdering":["score","tags","verdict"]"#));
        assert!(wire.contains(r#""enum":["improvement","strength"]"#));
        // Properties serialize in declaration order.
        let score_at = wire.find(r#""score""#).unwrap();
        let tags_at = wire.find(r#""tags""#).unwrap();
        assert!(score_at < tags_at);
    }

    #[test]
    fn test_conformant_value_passes() {
        let value = json!({
            "score": 87,
            "tags": ["rust", "tokio"],
            "verdict": "strength"
        });
        assert!(sample().validate(&value).is_ok());
    }

    #[test]
    fn test_extra_keys_are_tolerated() {
        let value = json!({
            "score": 87,
            "tags": [],
            "verdict": "strength",
            "unrequested": true
        });
        assert!(sample().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_rejected_with_path() {
        let value = json!({ "score": 87, "verdict": "strength" });
        let err = sample().validate(&value).unwrap_err();
        assert!(err.contains("$.tags"), "unexpected violation: {err}");
        assert!(err.contains("missing required field"));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let value = json!({ "score": "eighty-seven", "tags": [], "verdict": "strength" });
        let err = sample().validate(&value).unwrap_err();
        assert!(err.contains("$.score"));
        assert!(err.contains("expected integer"));
    }

    #[test]
    fn test_out_of_enum_string_is_rejected() {
        let value = json!({ "score": 1, "tags": [], "verdict": "meh" });
        let err = sample().validate(&value).unwrap_err();
        assert!(err.contains("$.verdict"));
    }

    #[test]
    fn test_array_elements_are_checked_with_index() {
        let value = json!({ "score": 1, "tags": ["ok", 3], "verdict": "strength" });
        let err = sample().validate(&value).unwrap_err();
        assert!(err.contains("$.tags[1]"));
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = sample().validate(&json!([1, 2])).unwrap_err();
        assert!(err.contains("$: expected object"));
    }
}
