//! Reading and writing JSON documents.

pub mod json;

pub use json::{document_to_string, read_export_spec, read_json_object, write_document};
