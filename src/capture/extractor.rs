//! Result extraction: filter a raw result map through an export spec.
//!
//! An export spec is an ordered list of capture paths. An empty list is
//! the capture-everything sentinel and yields the result map unchanged.
//! Otherwise each path contributes one output entry, keyed by the literal
//! capture string, in spec order. Missing result keys and missing row
//! fields are absorbed as JSON nulls so that partial visibility into a
//! large result never aborts the run.

use super::path::PathExpr;
use crate::rfc::types::JsonMap;
use crate::utils::error::ExtractError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// Export specification: which slices of the result to capture.
///
/// Deserialized from the export JSON file (`{"capture": [...]}`).
/// An absent file or an empty list means "capture everything".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSpec {
    #[serde(default)]
    pub capture: Vec<String>,
}

impl ExportSpec {
    /// Whether this spec is the capture-everything sentinel
    pub fn captures_everything(&self) -> bool {
        self.capture.is_empty()
    }

    /// Parse every capture string up front, so one malformed path fails
    /// the whole extraction before any entries are produced
    pub fn paths(&self) -> Result<Vec<PathExpr>, ExtractError> {
        self.capture.iter().map(|raw| PathExpr::parse(raw)).collect()
    }
}

/// Filter a result map through an export spec.
///
/// Output keys are exactly the literal capture strings, in spec order;
/// with an empty spec the result map is returned unchanged.
///
/// # Errors
/// * `ExtractError::MalformedPath` - a capture string fails the grammar
/// * `ExtractError::InvalidTableAccess` - a field path targets a non-table
pub fn extract(result: &JsonMap, spec: &ExportSpec) -> Result<JsonMap, ExtractError> {
    if spec.captures_everything() {
        debug!("Empty capture spec, returning full result map");
        return Ok(result.clone());
    }

    let mut output = JsonMap::new();
    for path in spec.paths()? {
        let value = capture_path(result, &path)?;
        output.insert(path.raw().to_string(), value);
    }

    Ok(output)
}

/// Evaluate one capture path against the result map
fn capture_path(result: &JsonMap, path: &PathExpr) -> Result<Value, ExtractError> {
    let Some(field) = path.field() else {
        // Whole-parameter capture; an absent key becomes an explicit null
        return Ok(match result.get(path.name()) {
            Some(value) => value.clone(),
            None => {
                warn!("Result has no parameter '{}'", path.name());
                Value::Null
            }
        });
    };

    match result.get(path.name()) {
        // Absent table: empty column rather than a failure
        None => {
            warn!("Result has no table parameter '{}'", path.name());
            Ok(Value::Array(Vec::new()))
        }
        Some(Value::Array(rows)) => {
            let column = rows
                .iter()
                .map(|row| row.get(field).cloned().unwrap_or(Value::Null))
                .collect();
            Ok(Value::Array(column))
        }
        Some(_) => Err(ExtractError::InvalidTableAccess(path.raw().to_string())),
    }
}
