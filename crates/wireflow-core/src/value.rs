//! Runtime values flowing along links.
//!
//! [`Value`] is the dynamic counterpart to the static parameter descriptors:
//! every `produce()` call yields a `Value` that propagation pushes into
//! downstream parameters. Serialization is untagged so protocol payloads
//! carry plain JSON scalars; a box reference serializes as `{"$ref": name}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A box's current parameter values, in declaration order.
pub type ParamValues = IndexMap<String, Value>;

/// A runtime value held by a parameter or produced by a box output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    /// Reference to a producing box. The passthrough output of a box with no
    /// output rule; only untyped ports accept it.
    BoxRef {
        #[serde(rename = "$ref")]
        name: String,
    },
}

impl Value {
    /// Numeric view of this value, widening integers to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns a human-readable description of the value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::BoxRef { .. } => "box reference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_number_widens_integers() {
        assert_eq!(Value::Integer(3).as_number(), Some(3.0));
        assert_eq!(Value::Number(0.5).as_number(), Some(0.5));
        assert_eq!(Value::Text("x".into()).as_number(), None);
    }

    #[test]
    fn serde_scalars_are_untagged() {
        assert_eq!(serde_json::to_string(&Value::Integer(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Value::Number(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Value::Boolean(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Value::Text("hi".into())).unwrap(), "\"hi\"");
    }

    #[test]
    fn serde_reads_plain_json() {
        let v: Value = serde_json::from_str("7").unwrap();
        assert_eq!(v, Value::Integer(7));
        let v: Value = serde_json::from_str("7.5").unwrap();
        assert_eq!(v, Value::Number(7.5));
        let v: Value = serde_json::from_str("\"label\"").unwrap();
        assert_eq!(v, Value::Text("label".into()));
    }

    #[test]
    fn box_ref_roundtrip() {
        let v = Value::BoxRef { name: "osc".into() };
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "{\"$ref\":\"osc\"}");
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
