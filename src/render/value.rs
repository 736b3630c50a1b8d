//! Structured value tree embedded in page content.

use super::RenderError;
use std::fmt;

/// A node of a structured data tree.
///
/// `Scalar`, `Sequence` and `Mapping` are the shapes the content parser
/// produces. `Foreign` carries any other primitive that showed up in the
/// data; it renders like a scalar after string coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Sequence(Vec<Value>),
    /// Entries in insertion order, keys unique.
    Mapping(Vec<(String, Value)>),
    Foreign(Primitive),
}

/// Primitive values outside the text/list/map union.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Null,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            // shortest round-trip form, `1e300` rather than 301 digits
            Self::Float(x) => match serde_json::Number::from_f64(*x) {
                Some(n) => write!(f, "{n}"),
                None => write!(f, "{x}"),
            },
            Self::Null => f.write_str("null"),
        }
    }
}

impl Value {
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// Build a mapping, rejecting duplicate keys.
    pub fn mapping<K, I>(entries: I) -> Result<Self, RenderError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut out: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            if out.iter().any(|(k, _)| *k == key) {
                return Err(RenderError::DuplicateKey(key));
            }
            out.push((key, value));
        }
        Ok(Self::Mapping(out))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::String(s) => Self::Scalar(s),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            // serde_json objects already have unique keys
            Json::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            Json::Bool(b) => Self::Foreign(Primitive::Bool(b)),
            Json::Number(n) => Self::Foreign(if let Some(i) = n.as_i64() {
                Primitive::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Primitive::Unsigned(u)
            } else {
                Primitive::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            Json::Null => Self::Foreign(Primitive::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_rejects_duplicate_keys() {
        let result = Value::mapping([("a", Value::scalar("1")), ("a", Value::scalar("2"))]);
        assert!(matches!(result, Err(RenderError::DuplicateKey(k)) if k == "a"));
    }

    #[test]
    fn test_mapping_keeps_order() {
        let value = Value::mapping([("b", Value::scalar("1")), ("a", Value::scalar("2"))]).unwrap();
        let Value::Mapping(entries) = value else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_from_json_preserves_object_order() {
        let value = Value::from(json!({"zeta": "z", "alpha": ["x", 1]}));
        assert_eq!(
            value,
            Value::Mapping(vec![
                ("zeta".into(), Value::scalar("z")),
                (
                    "alpha".into(),
                    Value::Sequence(vec![
                        Value::scalar("x"),
                        Value::Foreign(Primitive::Integer(1)),
                    ])
                ),
            ])
        );
    }

    #[test]
    fn test_primitive_display_is_locale_independent() {
        assert_eq!(Primitive::Bool(true).to_string(), "true");
        assert_eq!(Primitive::Integer(-42).to_string(), "-42");
        assert_eq!(Primitive::Float(1.5).to_string(), "1.5");
        assert_eq!(Primitive::Null.to_string(), "null");
    }

    #[test]
    fn test_from_json_keeps_large_integers_exact() {
        let json: serde_json::Value = serde_json::from_str("18446744073709551615").unwrap();
        let value = Value::from(json);

        assert_eq!(value, Value::Foreign(Primitive::Unsigned(u64::MAX)));
        let Value::Foreign(primitive) = value else {
            panic!("expected primitive");
        };
        assert_eq!(primitive.to_string(), "18446744073709551615");
    }

    #[test]
    fn test_large_float_display_is_short() {
        let json: serde_json::Value = serde_json::from_str("1e300").unwrap();
        let Value::Foreign(primitive) = Value::from(json) else {
            panic!("expected primitive");
        };

        assert_eq!(primitive.to_string(), "1e300");
        assert_eq!(Primitive::Float(-0.25).to_string(), "-0.25");
        assert_eq!(Primitive::Float(f64::NAN).to_string(), "NaN");
    }
}
