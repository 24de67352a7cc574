//! Interface description rendering.
//!
//! Turns interface metadata into a fixed-width listing of parameters in
//! declaration order, with an indented sub-block for structure/row
//! schemas when the metadata carries them. Pure formatting.

use crate::rfc::types::{InterfaceMetadata, ParameterDescriptor};
use crate::utils::error::DescribeError;

const NAME_WIDTH: usize = 30;
const TYPE_WIDTH: usize = 12;
const DIRECTION_WIDTH: usize = 10;
const KIND_WIDTH: usize = 8;
const OPTIONAL_WIDTH: usize = 9;

/// Render interface metadata as display rows, one per parameter.
///
/// # Errors
/// * `DescribeError::EmptyInterface` - the function declares no parameters,
///   which usually means the function name was wrong
pub fn describe_interface(interface: &InterfaceMetadata) -> Result<Vec<String>, DescribeError> {
    if interface.parameters.is_empty() {
        return Err(DescribeError::EmptyInterface(interface.function.clone()));
    }

    let mut rows = Vec::with_capacity(interface.parameters.len() + 2);
    rows.push(format!(
        "{:<NAME_WIDTH$} {:<TYPE_WIDTH$} {:<DIRECTION_WIDTH$} {:<KIND_WIDTH$} {:<OPTIONAL_WIDTH$} {}",
        "NAME", "TYPE", "DIRECTION", "KIND", "OPTIONAL", "DEFAULT"
    ));

    for parameter in &interface.parameters {
        rows.push(render_parameter(parameter));
        render_fields(parameter, &mut rows);
    }

    Ok(rows)
}

fn render_parameter(parameter: &ParameterDescriptor) -> String {
    format!(
        "{:<NAME_WIDTH$} {:<TYPE_WIDTH$} {:<DIRECTION_WIDTH$} {:<KIND_WIDTH$} {:<OPTIONAL_WIDTH$} {}",
        parameter.name,
        parameter.type_name.as_deref().unwrap_or("-"),
        parameter.direction.to_string(),
        parameter.kind.to_string(),
        if parameter.optional { "yes" } else { "no" },
        parameter.default_value.as_deref().unwrap_or(""),
    )
    .trim_end()
    .to_string()
}

/// Append the structure/row schema block for one parameter, if any
fn render_fields(parameter: &ParameterDescriptor, rows: &mut Vec<String>) {
    if parameter.fields.is_empty() {
        return;
    }

    rows.push(format!("    --- fields of {} ---", parameter.name));
    for field in &parameter.fields {
        let mut line = format!(
            "    {:<26} {:<TYPE_WIDTH$}",
            field.name,
            field.type_name.as_deref().unwrap_or("-"),
        );
        if let Some(length) = field.length {
            line.push_str(&format!(" len={}", length));
        }
        if let Some(decimals) = field.decimals {
            line.push_str(&format!(" dec={}", decimals));
        }
        rows.push(line.trim_end().to_string());
    }
}
