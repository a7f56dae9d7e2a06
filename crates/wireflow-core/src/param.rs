//! Parameter descriptors: the static metadata declared by a box type for
//! each of its named attributes.
//!
//! A [`ParamDescriptor`] pairs a value kind (with optional bounds, step, or
//! enumerated choices) with a declared [`PortMode`] and a default value.
//! Validation of a candidate [`Value`] against a descriptor is a pure
//! function -- it never touches the box holding the value, which is what
//! makes link validity checking side-effect-free.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::value::Value;

/// Classification of a parameter as a wiring target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    /// Typed, linkable, editable. Renders as both a settable value and an
    /// inbound port.
    Normal,
    /// Linkable with a presence-only check: accepts any output value.
    Untyped,
    /// Value-only. Not exposed as a port.
    Hidden,
}

/// The kind of value a parameter holds, with any kind-specific constraints.
///
/// Bounds are inclusive and enforced on assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamKind {
    Number {
        min: Option<f64>,
        max: Option<f64>,
        /// Suggested GUI increment.
        step: f64,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Text,
    Toggle,
    Selector {
        choices: Vec<String>,
    },
}

/// Describes one named attribute of a box type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub kind: ParamKind,
    pub default: Value,
    pub mode: PortMode,
    /// Optional display label; falls back to the parameter name with
    /// underscores replaced by spaces.
    pub label: Option<String>,
}

impl ParamDescriptor {
    /// A float parameter with the default GUI step of 0.01.
    pub fn number(default: f64) -> Self {
        ParamDescriptor {
            kind: ParamKind::Number {
                min: None,
                max: None,
                step: 0.01,
            },
            default: Value::Number(default),
            mode: PortMode::Normal,
            label: None,
        }
    }

    /// An integer parameter.
    pub fn integer(default: i64) -> Self {
        ParamDescriptor {
            kind: ParamKind::Integer {
                min: None,
                max: None,
            },
            default: Value::Integer(default),
            mode: PortMode::Normal,
            label: None,
        }
    }

    /// A free-form text parameter.
    pub fn text(default: &str) -> Self {
        ParamDescriptor {
            kind: ParamKind::Text,
            default: Value::Text(default.to_string()),
            mode: PortMode::Normal,
            label: None,
        }
    }

    /// A boolean parameter.
    pub fn toggle(default: bool) -> Self {
        ParamDescriptor {
            kind: ParamKind::Toggle,
            default: Value::Boolean(default),
            mode: PortMode::Normal,
            label: None,
        }
    }

    /// An enumerated-choice parameter. The default is the first choice.
    pub fn selector(choices: &[&str]) -> Self {
        let default = choices.first().copied().unwrap_or_default();
        ParamDescriptor {
            kind: ParamKind::Selector {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
            default: Value::Text(default.to_string()),
            mode: PortMode::Normal,
            label: None,
        }
    }

    /// Sets inclusive bounds on a `Number` or `Integer` kind. No-op for
    /// other kinds.
    pub fn bounded(mut self, lo: f64, hi: f64) -> Self {
        match &mut self.kind {
            ParamKind::Number { min, max, .. } => {
                *min = Some(lo);
                *max = Some(hi);
            }
            ParamKind::Integer { min, max } => {
                *min = Some(lo as i64);
                *max = Some(hi as i64);
            }
            _ => {}
        }
        self
    }

    /// Overrides the suggested GUI step of a `Number` kind.
    pub fn with_step(mut self, value: f64) -> Self {
        if let ParamKind::Number { step, .. } = &mut self.kind {
            *step = value;
        }
        self
    }

    /// Marks this parameter as an untyped port.
    pub fn untyped(mut self) -> Self {
        self.mode = PortMode::Untyped;
        self
    }

    /// Marks this parameter as value-only (not a port).
    pub fn hidden(mut self) -> Self {
        self.mode = PortMode::Hidden;
        self
    }

    /// Sets an explicit display label.
    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Checks a candidate value against this descriptor.
    ///
    /// Pure: the check never mutates any box state. Untyped ports accept
    /// every value. Integers widen into `Number` parameters; the reverse
    /// narrowing is rejected.
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), GraphError> {
        if self.mode == PortMode::Untyped {
            return Ok(());
        }
        let reject = |reason: String| GraphError::InvalidParameter {
            name: name.to_string(),
            reason,
        };
        match &self.kind {
            ParamKind::Number { min, max, .. } => {
                let v = value
                    .as_number()
                    .ok_or_else(|| reject(format!("expected a number, got {}", value.kind_name())))?;
                if let Some(lo) = min {
                    if v < *lo {
                        return Err(reject(format!("{} is below the minimum of {}", v, lo)));
                    }
                }
                if let Some(hi) = max {
                    if v > *hi {
                        return Err(reject(format!("{} is above the maximum of {}", v, hi)));
                    }
                }
                Ok(())
            }
            ParamKind::Integer { min, max } => {
                let v = match value {
                    Value::Integer(v) => *v,
                    other => {
                        return Err(reject(format!(
                            "expected an integer, got {}",
                            other.kind_name()
                        )))
                    }
                };
                if let Some(lo) = min {
                    if v < *lo {
                        return Err(reject(format!("{} is below the minimum of {}", v, lo)));
                    }
                }
                if let Some(hi) = max {
                    if v > *hi {
                        return Err(reject(format!("{} is above the maximum of {}", v, hi)));
                    }
                }
                Ok(())
            }
            ParamKind::Text => match value {
                Value::Text(_) => Ok(()),
                other => Err(reject(format!("expected text, got {}", other.kind_name()))),
            },
            ParamKind::Toggle => match value {
                Value::Boolean(_) => Ok(()),
                other => Err(reject(format!(
                    "expected a boolean, got {}",
                    other.kind_name()
                ))),
            },
            ParamKind::Selector { choices } => match value {
                Value::Text(v) if choices.contains(v) => Ok(()),
                Value::Text(v) => Err(reject(format!("'{}' is not one of {:?}", v, choices))),
                other => Err(reject(format!(
                    "expected a choice string, got {}",
                    other.kind_name()
                ))),
            },
        }
    }
}
