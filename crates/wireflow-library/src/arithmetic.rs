//! Arithmetic kinds: bounded value sources and binary operations over
//! numeric ports.

use serde_json::json;
use wireflow_core::{BoxType, Catalog, GraphError, ParamDescriptor, ParamValues, Value};

use crate::num;

fn percentage_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "percent"))
}

fn percentage_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": percentage_output(values) })
}

fn ratio_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "ratio"))
}

fn ratio_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": ratio_output(values) })
}

fn add_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "lhs") + num(values, "rhs"))
}

fn add_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": add_output(values) })
}

fn subtract_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "lhs") - num(values, "rhs"))
}

fn subtract_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": subtract_output(values) })
}

fn multiply_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "input") * num(values, "multiplier"))
}

fn multiply_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": multiply_output(values) })
}

// IEEE semantics: division by zero yields an infinity, not an error.
fn divide_output(values: &ParamValues) -> Value {
    Value::Number(num(values, "input") / num(values, "divisor"))
}

fn divide_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": divide_output(values) })
}

fn binary_op_output(values: &ParamValues) -> Value {
    let lhs = num(values, "lhs");
    let rhs = num(values, "rhs");
    let op = match values.get("operator") {
        Some(Value::Text(op)) => op.as_str(),
        _ => "add",
    };
    let result = match op {
        "add" => lhs + rhs,
        "sub" => lhs - rhs,
        "mul" => lhs * rhs,
        "div" => lhs / rhs,
        "mod" => lhs % rhs,
        "pow" => lhs.powf(rhs),
        // Unreachable via the selector; keep the output total anyway.
        _ => lhs,
    };
    Value::Number(result)
}

fn binary_op_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": binary_op_output(values) })
}

/// Registers the arithmetic kinds.
pub fn load_arithmetic(catalog: &mut Catalog) -> Result<(), GraphError> {
    catalog.register(
        BoxType::new("Percentage", "arithmetic")
            .with_param(
                "percent",
                ParamDescriptor::number(50.0).bounded(0.0, 100.0).with_step(1.0).hidden(),
            )
            .with_output(percentage_output)
            .with_display(percentage_display),
    )?;
    catalog.register(
        BoxType::new("Ratio", "arithmetic")
            .with_param("ratio", ParamDescriptor::number(0.5).bounded(0.0, 1.0).hidden())
            .with_output(ratio_output)
            .with_display(ratio_display),
    )?;
    catalog.register(
        BoxType::new("Add", "arithmetic")
            .with_param("lhs", ParamDescriptor::number(0.0))
            .with_param("rhs", ParamDescriptor::number(1.0))
            .with_output(add_output)
            .with_display(add_display),
    )?;
    catalog.register(
        BoxType::new("Subtract", "arithmetic")
            .with_param("lhs", ParamDescriptor::number(0.0))
            .with_param("rhs", ParamDescriptor::number(1.0))
            .with_output(subtract_output)
            .with_display(subtract_display),
    )?;
    catalog.register(
        BoxType::new("Multiply", "arithmetic")
            .with_param("input", ParamDescriptor::number(0.0))
            .with_param("multiplier", ParamDescriptor::number(1.0))
            .with_output(multiply_output)
            .with_display(multiply_display),
    )?;
    catalog.register(
        BoxType::new("Divide", "arithmetic")
            .with_param("input", ParamDescriptor::number(0.0))
            .with_param("divisor", ParamDescriptor::number(1.0))
            .with_output(divide_output)
            .with_display(divide_display),
    )?;
    catalog.register(
        BoxType::new("BinaryOp", "arithmetic")
            .with_param("lhs", ParamDescriptor::number(0.0))
            .with_param("rhs", ParamDescriptor::number(1.0))
            .with_param(
                "operator",
                ParamDescriptor::selector(&["add", "sub", "mul", "div", "mod", "pow"]),
            )
            .with_output(binary_op_output)
            .with_display(binary_op_display),
    )?;
    Ok(())
}
