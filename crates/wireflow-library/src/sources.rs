//! Source kinds: boxes that hold one editable value and produce it.
//!
//! The held parameter is hidden (value-only, not a port) -- a source's only
//! wiring surface is its output.

use serde_json::json;
use wireflow_core::{BoxType, Catalog, GraphError, ParamDescriptor, ParamValues, Value};

fn number_output(values: &ParamValues) -> Value {
    Value::Number(crate::num(values, "number"))
}

fn number_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": number_output(values) })
}

fn integer_output(values: &ParamValues) -> Value {
    values["integer"].clone()
}

fn integer_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": integer_output(values) })
}

fn text_output(values: &ParamValues) -> Value {
    values["text"].clone()
}

fn text_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": text_output(values) })
}

fn toggle_output(values: &ParamValues) -> Value {
    values["state"].clone()
}

fn toggle_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": toggle_output(values) })
}

/// Registers the source kinds: Number, Integer, Text, Toggle.
pub fn load_sources(catalog: &mut Catalog) -> Result<(), GraphError> {
    catalog.register(
        BoxType::new("Number", "sources")
            .with_param("number", ParamDescriptor::number(0.0).hidden())
            .with_output(number_output)
            .with_display(number_display),
    )?;
    catalog.register(
        BoxType::new("Integer", "sources")
            .with_param("integer", ParamDescriptor::integer(0).hidden())
            .with_output(integer_output)
            .with_display(integer_display),
    )?;
    catalog.register(
        BoxType::new("Text", "sources")
            .with_param("text", ParamDescriptor::text("").hidden())
            .with_output(text_output)
            .with_display(text_display),
    )?;
    catalog.register(
        BoxType::new("Toggle", "sources")
            .with_param("state", ParamDescriptor::toggle(false).hidden())
            .with_output(toggle_output)
            .with_display(toggle_display),
    )?;
    Ok(())
}
