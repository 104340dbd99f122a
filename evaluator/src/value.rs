//! Runtime values produced by evaluating a compiled expression.
//!
//! Mirrors `analyzer::Ty`'s primitive shapes at the value level: every
//! `Ty` except `Interpolation`, `Vector`/`Array`/`AnyArray` (all collapse to
//! [`Value::Array`], since by the time evaluation runs the static shape has
//! already been checked) and `Lambda`/`Typename`/`NArgs` (compile-time-only
//! constructs with no runtime representation).

use serde_json::Map;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// RGBA, each channel in `[0, 1]`.
    Color([f64; 4]),
    Array(Vec<Value>),
    Object(Map<String, serde_json::Value>),
}

impl Value {
    /// The name `typeof` reports for this value (spec.md §4.4).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Color(_) => "Color",
            Value::Array(_) => "Vector<Value>",
            Value::Object(_) => "Object",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f64; 4]> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Convert an arbitrary `serde_json::Value` (e.g. a feature property, or
    /// the output of the `json_array`/`object` coercions) into a runtime
    /// [`Value`]. Objects keep their raw JSON so `get` can look up nested
    /// keys without committing to a concrete element type up front.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(map.clone()),
        }
    }

    /// Inverse of [`Value::from_json`], used when a `Value` needs to cross
    /// back into plain JSON (e.g. `json_array`'s coercion target).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Color(c) => {
                serde_json::Value::Array(c.iter().map(|x| serde_json::json!(x)).collect())
            }
            Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => serde_json::Value::Object(map.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_name_matches_spec_vocabulary() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::Color([0.0, 0.0, 0.0, 1.0]).type_name(), "Color");
        assert_eq!(Value::Array(vec![]).type_name(), "Vector<Value>");
    }

    #[test]
    fn json_round_trips_through_array_and_object() {
        let json = json!({"a": [1, "x", null, true]});
        let value = Value::from_json(&json);
        assert_eq!(value, Value::Object(json.as_object().unwrap().clone()));
    }
}
