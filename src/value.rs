use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single spacing value as written by the author.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

/// The three shapes a spacing prop can take.
#[derive(Debug, Clone, PartialEq)]
pub enum SpacingValue {
    Scalar(Scalar),
    /// Responsive array, one slot per breakpoint. `None` marks a hole.
    Sequence(Vec<Option<Scalar>>),
    /// Responsive object keyed by breakpoint name, in declaration order.
    Collection(Vec<(String, Option<Scalar>)>),
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<Scalar> for SpacingValue {
    fn from(v: Scalar) -> Self {
        SpacingValue::Scalar(v)
    }
}

impl From<f64> for SpacingValue {
    fn from(n: f64) -> Self {
        SpacingValue::Scalar(n.into())
    }
}

impl From<i32> for SpacingValue {
    fn from(n: i32) -> Self {
        SpacingValue::Scalar(n.into())
    }
}

impl From<&str> for SpacingValue {
    fn from(s: &str) -> Self {
        SpacingValue::Scalar(s.into())
    }
}

impl Scalar {
    /// Leaf conversion for JSON input. Anything that is not a number or a
    /// string keeps its JSON text so it still reaches the literal fallback.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) => Scalar::Number(f),
                None => Scalar::Text(n.to_string()),
            }),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            other => Some(Scalar::Text(other.to_string())),
        }
    }
}

impl SpacingValue {
    /// `None` for a bare `null`, which carries no value at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(SpacingValue::Sequence(
                items.iter().map(Scalar::from_json).collect(),
            )),
            Value::Object(map) => Some(SpacingValue::Collection(
                map.iter()
                    .map(|(k, v)| (k.clone(), Scalar::from_json(v)))
                    .collect(),
            )),
            other => Scalar::from_json(other).map(SpacingValue::Scalar),
        }
    }
}

impl<'de> Deserialize<'de> for SpacingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        SpacingValue::from_json(&raw)
            .ok_or_else(|| serde::de::Error::custom("spacing value is null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_keys_keep_declaration_order() {
        let v: SpacingValue =
            serde_json::from_str(r#"{"lg": 4, "base": "8px", "md": null}"#).unwrap();
        assert_eq!(
            v,
            SpacingValue::Collection(vec![
                ("lg".into(), Some(Scalar::Number(4.0))),
                ("base".into(), Some(Scalar::Text("8px".into()))),
                ("md".into(), None),
            ])
        );
    }

    #[test]
    fn arrays_keep_holes() {
        let v: SpacingValue = serde_json::from_str(r#"[2, null, "1rem"]"#).unwrap();
        assert_eq!(
            v,
            SpacingValue::Sequence(vec![Some(2.into()), None, Some("1rem".into())])
        );
    }

    #[test]
    fn odd_leaves_become_text() {
        let v: SpacingValue = serde_json::from_str(r#"{"base": true, "md": {"x": 1}}"#).unwrap();
        assert_eq!(
            v,
            SpacingValue::Collection(vec![
                ("base".into(), Some(Scalar::Text("true".into()))),
                ("md".into(), Some(Scalar::Text(r#"{"x":1}"#.into()))),
            ])
        );
    }

    #[test]
    fn bare_null_is_rejected() {
        assert!(serde_json::from_str::<SpacingValue>("null").is_err());
    }
}
