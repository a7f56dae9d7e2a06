//! Protocol message types for the wireflow websocket API.
//!
//! Inbound frames are [`ClientCommand`] values tagged by `command` with the
//! payload under `data`; outbound frames are [`ServerEvent`] values tagged
//! by `event`. The catalog serialization pushed on connect describes every
//! constructible kind so the client can build its palette and widgets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use wireflow_core::{BoxType, Catalog, ParamKind, ParamValues, PortMode, Value};

/// An inbound edit or trigger, one per websocket text frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Construct a box of the named type and add it to the graph.
    AddNode {
        #[serde(rename = "type")]
        type_name: String,
        name: String,
        #[serde(default)]
        params: ParamValues,
    },
    /// Remove a box (the session unlinks it first).
    RemoveNode { name: String },
    /// Validate and add a link, then flush downstream.
    AddEdge {
        src: String,
        output: String,
        dest: String,
        input: String,
    },
    /// Remove a link, resetting the destination parameter to its default.
    RemoveEdge {
        src: String,
        output: String,
        dest: String,
        input: String,
    },
    /// Apply a parameter delta and cascade.
    UpdateParams {
        name: String,
        #[serde(default)]
        params: ParamValues,
    },
    /// Invoke a named action ("button"), then cascade.
    TriggerButton { name: String, button: String },
}

/// An outbound notification.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Catalog serialization, pushed once on connect.
    Definitions {
        definitions: IndexMap<String, TypeDefinition>,
    },
    /// One per affected box after any mutation. `display` is the opaque
    /// payload of the box kind's display adapter.
    ValueUpdate {
        name: String,
        display: serde_json::Value,
    },
    /// A proposed link was rejected; the client rolls back its speculative
    /// edge.
    InvalidEdge {
        src: String,
        output: String,
        dest: String,
        input: String,
    },
}

/// Palette entry for one constructible box kind.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDefinition {
    pub group: String,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortStub>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<String>,
}

/// Widget metadata for one declared parameter.
#[derive(Debug, Clone, Serialize)]
pub struct PortDefinition {
    pub name: String,
    pub label: String,
    pub mode: PortMode,
    pub value: Value,
    /// Present bounds, low then high.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lims: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// The (single, untyped) output port every box exposes.
#[derive(Debug, Clone, Serialize)]
pub struct PortStub {
    pub name: String,
    pub mode: PortMode,
}

impl TypeDefinition {
    pub fn from_type(boxtype: &BoxType) -> Self {
        let inputs = boxtype
            .params()
            .iter()
            .map(|(name, descriptor)| {
                let (lims, step, choices) = match &descriptor.kind {
                    ParamKind::Number { min, max, step } => (
                        min.iter().chain(max.iter()).copied().collect(),
                        Some(*step),
                        Vec::new(),
                    ),
                    ParamKind::Integer { min, max } => (
                        min.iter().chain(max.iter()).map(|v| *v as f64).collect(),
                        Some(1.0),
                        Vec::new(),
                    ),
                    ParamKind::Selector { choices } => (Vec::new(), None, choices.clone()),
                    ParamKind::Text | ParamKind::Toggle => (Vec::new(), None, Vec::new()),
                };
                PortDefinition {
                    name: name.clone(),
                    label: boxtype.label(name),
                    mode: descriptor.mode,
                    value: descriptor.default.clone(),
                    lims,
                    step,
                    choices,
                }
            })
            .collect();
        TypeDefinition {
            group: boxtype.group().to_string(),
            inputs,
            outputs: vec![PortStub {
                name: String::new(),
                mode: PortMode::Untyped,
            }],
            buttons: boxtype.action_names().map(str::to_string).collect(),
        }
    }
}

/// Serializes a catalog into its palette form, in registration order.
pub fn definitions(catalog: &Catalog) -> IndexMap<String, TypeDefinition> {
    catalog
        .iter()
        .map(|bt| (bt.name().to_string(), TypeDefinition::from_type(bt)))
        .collect()
}
