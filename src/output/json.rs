//! JSON document input/output.
//!
//! Reads the import document and export spec files, and writes or prints
//! the output document with stable key order and pretty formatting.

use crate::capture::ExportSpec;
use crate::rfc::types::JsonMap;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Read a JSON file that must contain a top-level object
///
/// # Errors
/// * `OutputError::Io` - file cannot be read
/// * `OutputError::Json` - contents are not valid JSON
/// * `OutputError::NotAnObject` - top-level value is not an object
pub fn read_json_object(path: impl AsRef<Path>) -> Result<JsonMap, OutputError> {
    let path = path.as_ref();
    debug!("Reading JSON document: {}", path.display());

    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(file)?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(OutputError::NotAnObject {
            path: path.display().to_string(),
            found: json_type_name(&other).to_string(),
        }),
    }
}

/// Read an export spec file (`{"capture": [...]}`)
pub fn read_export_spec(path: impl AsRef<Path>) -> Result<ExportSpec, OutputError> {
    let path = path.as_ref();
    debug!("Reading export spec: {}", path.display());

    let file = File::open(path)?;
    let spec: ExportSpec = serde_json::from_reader(file)?;
    Ok(spec)
}

/// Serialize an output document to a pretty JSON string
pub fn document_to_string(document: &JsonMap) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write an output document to a JSON file
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty or a directory
/// * `OutputError::Io` - I/O error during write
/// * `OutputError::Json` - serialization error
pub fn write_document(document: &JsonMap, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing output document to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, document)?;

    Ok(())
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_json_object() {
        let file = write_temp(r#"{"QUERY_TABLE": "USR02"}"#);
        let map = read_json_object(file.path()).unwrap();
        assert_eq!(map["QUERY_TABLE"], json!("USR02"));
    }

    #[test]
    fn test_read_json_object_rejects_array() {
        let file = write_temp("[1, 2]");
        let err = read_json_object(file.path()).unwrap_err();
        assert!(matches!(err, OutputError::NotAnObject { found, .. } if found == "array"));
    }

    #[test]
    fn test_read_export_spec() {
        let file = write_temp(r#"{"capture": ["A", "B[C]"]}"#);
        let spec = read_export_spec(file.path()).unwrap();
        assert_eq!(spec.capture, vec!["A", "B[C]"]);
    }

    #[test]
    fn test_read_export_spec_missing_capture_key() {
        let file = write_temp("{}");
        let spec = read_export_spec(file.path()).unwrap();
        assert!(spec.captures_everything());
    }

    #[test]
    fn test_write_and_reread_document() {
        let mut document = JsonMap::new();
        document.insert("B".to_string(), json!([1, 2]));
        document.insert("A".to_string(), json!("x"));

        let temp_file = NamedTempFile::new().unwrap();
        write_document(&document, temp_file.path()).unwrap();

        let loaded = read_json_object(temp_file.path()).unwrap();
        assert_eq!(loaded, document);
        // Insertion order survives the round trip
        let keys: Vec<&String> = loaded.keys().collect();
        assert_eq!(keys, ["B", "A"]);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/output.json");

        write_document(&JsonMap::new(), &nested_path).unwrap();
        assert!(nested_path.exists());
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }
}
