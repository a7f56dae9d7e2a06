//! Live box instances: named, mutable holders of current parameter values.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::boxtype::BoxType;
use crate::error::GraphError;
use crate::param::ParamDescriptor;
use crate::value::{ParamValues, Value};

/// A live instance of a [`BoxType`].
///
/// Holds the box's client-chosen name (unique within its graph, stable for
/// the box's lifetime) and its current parameter values. Every key in the
/// value map corresponds to a declared parameter of the type.
#[derive(Debug, Clone)]
pub struct BoxInstance {
    name: String,
    boxtype: Arc<BoxType>,
    values: ParamValues,
}

impl BoxInstance {
    /// Creates an instance holding the type's declared defaults.
    pub fn new(boxtype: Arc<BoxType>, name: &str) -> Self {
        let values = boxtype.default_values();
        BoxInstance {
            name: name.to_string(),
            boxtype,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        self.boxtype.name()
    }

    pub fn boxtype(&self) -> &Arc<BoxType> {
        &self.boxtype
    }

    /// Read-only introspection of the declared parameters.
    pub fn params(&self) -> &IndexMap<String, ParamDescriptor> {
        self.boxtype.params()
    }

    /// Current value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &ParamValues {
        &self.values
    }

    /// Applies a partial value mapping, all-or-nothing.
    ///
    /// Every key is validated against its descriptor before any is
    /// committed; on failure ([`GraphError::InvalidParameter`] naming the
    /// offending key) no partial mutation is observable.
    pub fn set_params(&mut self, delta: &ParamValues) -> Result<(), GraphError> {
        for (key, value) in delta {
            let descriptor =
                self.boxtype
                    .param(key)
                    .ok_or_else(|| GraphError::InvalidParameter {
                        name: key.clone(),
                        reason: format!("box '{}' declares no such parameter", self.name),
                    })?;
            descriptor.validate(key, value)?;
        }
        for (key, value) in delta {
            self.values.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Computes the box's output value. Side-effect-free.
    ///
    /// Types without an output rule produce a reference to the box itself,
    /// so downstream consumers receive a handle rather than a primitive;
    /// consumers that expect a primitive must coerce.
    pub fn produce(&self) -> Value {
        match self.boxtype.output(&self.values) {
            Some(value) => value,
            None => Value::BoxRef {
                name: self.name.clone(),
            },
        }
    }

    /// Runs a named zero-argument action and returns the full post-action
    /// parameter mapping (actions may mutate several parameters).
    pub fn invoke(&mut self, action: &str) -> Result<ParamValues, GraphError> {
        let f = self
            .boxtype
            .action(action)
            .ok_or_else(|| GraphError::UnknownAction {
                name: action.to_string(),
            })?;
        f(&mut self.values);
        Ok(self.values.clone())
    }

    /// Resets the named parameter to its declared default. Returns `false`
    /// when the parameter is undeclared.
    pub(crate) fn reset_to_default(&mut self, name: &str) -> bool {
        match self.boxtype.param(name) {
            Some(descriptor) => {
                self.values.insert(name.to_string(), descriptor.default.clone());
                true
            }
            None => false,
        }
    }
}
