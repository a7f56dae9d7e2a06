//! Box type descriptors: the immutable template a live box is built from.
//!
//! A [`BoxType`] declares an ordered set of parameter descriptors, an
//! explicit optional output rule, an explicit action table ("buttons"), and
//! an optional display adapter. All capabilities are resolved at
//! registration time -- nothing is probed per call.

use indexmap::IndexMap;

use crate::param::{ParamDescriptor, PortMode};
use crate::value::{ParamValues, Value};

/// Computes a box's output value from its current parameter values.
pub type OutputFn = fn(&ParamValues) -> Value;

/// A zero-argument action ("button") that may mutate several parameters.
pub type ActionFn = fn(&mut ParamValues);

/// Produces the opaque display payload sent to clients alongside a value
/// update. Box kinds with no visual representation declare none.
pub type DisplayFn = fn(&ParamValues) -> serde_json::Value;

/// Immutable descriptor of a constructible kind of box.
///
/// Registered once into a [`Catalog`](crate::catalog::Catalog) at process
/// start; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BoxType {
    name: String,
    /// Catalog grouping shown in the client palette.
    group: String,
    params: IndexMap<String, ParamDescriptor>,
    output: Option<OutputFn>,
    actions: IndexMap<String, ActionFn>,
    display: Option<DisplayFn>,
}

impl BoxType {
    pub fn new(name: &str, group: &str) -> Self {
        BoxType {
            name: name.to_string(),
            group: group.to_string(),
            params: IndexMap::new(),
            output: None,
            actions: IndexMap::new(),
            display: None,
        }
    }

    /// Declares a parameter. Declaration order is the display order.
    pub fn with_param(mut self, name: &str, descriptor: ParamDescriptor) -> Self {
        self.params.insert(name.to_string(), descriptor);
        self
    }

    /// Declares the output rule. Box types without one produce a reference
    /// to the box itself.
    pub fn with_output(mut self, f: OutputFn) -> Self {
        self.output = Some(f);
        self
    }

    /// Declares a named zero-argument action.
    pub fn with_action(mut self, name: &str, f: ActionFn) -> Self {
        self.actions.insert(name.to_string(), f);
        self
    }

    /// Declares the display adapter.
    pub fn with_display(mut self, f: DisplayFn) -> Self {
        self.display = Some(f);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// All declared parameters, in declaration order.
    pub fn params(&self) -> &IndexMap<String, ParamDescriptor> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.get(name)
    }

    /// Port mode of the named parameter, when declared.
    pub fn mode(&self, name: &str) -> Option<PortMode> {
        self.params.get(name).map(|d| d.mode)
    }

    /// Display label for a parameter: its declared label, or the name with
    /// underscores replaced by spaces.
    pub fn label(&self, name: &str) -> String {
        match self.params.get(name).and_then(|d| d.label.as_deref()) {
            Some(label) => label.to_string(),
            None => name.replace('_', " "),
        }
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Runs the output rule, when one is declared.
    pub fn output(&self, values: &ParamValues) -> Option<Value> {
        self.output.map(|f| f(values))
    }

    /// Declared action names, in declaration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn action(&self, name: &str) -> Option<ActionFn> {
        self.actions.get(name).copied()
    }

    /// Runs the display adapter; an empty object when none is declared.
    pub fn display(&self, values: &ParamValues) -> serde_json::Value {
        match self.display {
            Some(f) => f(values),
            None => serde_json::json!({}),
        }
    }

    /// The declared default for every parameter, in declaration order.
    pub fn default_values(&self) -> ParamValues {
        self.params
            .iter()
            .map(|(name, d)| (name.clone(), d.default.clone()))
            .collect()
    }
}
