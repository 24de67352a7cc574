//! Parameter marshalling: import document to call arguments.
//!
//! The import document is flat, human-authored JSON keyed by parameter
//! name. Marshalling validates every key against the interface metadata
//! fetched for this invocation and passes values through shape-checked.
//! An unknown key is a hard failure rather than a silent drop: a typo'd
//! parameter name on a destructive function module must not change the
//! call's meaning unnoticed.

use crate::rfc::types::{InterfaceMetadata, JsonMap, ParamKind};
use crate::utils::error::MarshalError;
use log::debug;
use serde_json::Value;

/// Build call arguments from an import document.
///
/// Every key must name a declared, writable (IMPORT/CHANGING/TABLES)
/// parameter. Table values must be arrays of row objects and are passed
/// through in order; scalar values pass through unchanged, including
/// nested objects for structured parameters. Declared parameters absent
/// from the document are omitted so RFC-side defaults apply.
///
/// # Errors
/// * `MarshalError::UnknownParameter` - key not declared by the interface
/// * `MarshalError::NotWritable` - key names an EXPORT-only parameter
/// * `MarshalError::InvalidTableValue` - table value is not an array of objects
pub fn build_call_args(
    import_doc: &JsonMap,
    interface: &InterfaceMetadata,
) -> Result<JsonMap, MarshalError> {
    let mut args = JsonMap::new();

    for (name, value) in import_doc {
        let descriptor = interface
            .find(name)
            .ok_or_else(|| MarshalError::UnknownParameter(name.clone()))?;

        if !descriptor.direction.is_writable() {
            return Err(MarshalError::NotWritable(name.clone()));
        }

        if descriptor.kind == ParamKind::Table {
            validate_table_value(name, value)?;
        }

        args.insert(name.clone(), value.clone());
    }

    debug!(
        "Marshalled {} of {} declared parameters for '{}'",
        args.len(),
        interface.parameters.len(),
        interface.function
    );

    Ok(args)
}

/// Check that a table parameter value is a sequence of row objects.
///
/// Row field names are taken as-is; the real row type lives SAP-side and
/// is enforced there, not here.
fn validate_table_value(name: &str, value: &Value) -> Result<(), MarshalError> {
    let rows = value
        .as_array()
        .ok_or_else(|| MarshalError::InvalidTableValue(name.to_string()))?;

    if rows.iter().any(|row| !row.is_object()) {
        return Err(MarshalError::InvalidTableValue(name.to_string()));
    }

    Ok(())
}
