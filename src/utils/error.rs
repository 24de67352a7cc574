//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the RFC gateway
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Function module not found: {0}")]
    FunctionNotFound(String),

    #[error("Logon rejected for client {client} on {ashost}: {message}")]
    LogonFailed {
        ashost: String,
        client: String,
        message: String,
    },

    #[error("ABAP error from function module: {0}")]
    AbapError(String),
}

/// Errors that can occur while marshalling an import document
/// into call arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MarshalError {
    #[error("Import parameter '{0}' is not declared by the function interface")]
    UnknownParameter(String),

    #[error("Parameter '{0}' is export-only and cannot be supplied")]
    NotWritable(String),

    #[error("Table parameter '{0}' must be an array of row objects")]
    InvalidTableValue(String),
}

/// Errors that can occur while parsing capture paths or extracting results
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Malformed capture path '{raw}': {reason}")]
    MalformedPath { raw: String, reason: String },

    #[error("Capture path '{0}' applies field access to a non-table result")]
    InvalidTableAccess(String),
}

/// Errors that can occur while rendering interface metadata
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DescribeError {
    #[error("Function '{0}' declares no parameters (does the function exist?)")]
    EmptyInterface(String),
}

/// Errors that can occur while resolving connection configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read connection file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection file syntax error at line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("Connection file contains no sections")]
    NoSections,

    #[error("Destination '{0}' not found in connection file")]
    DestinationNotFound(String),

    #[error("Section '{section}' is missing required key '{key}'")]
    MissingKey { section: String, key: String },

    #[error("Invalid system number '{0}': expected a number between 00 and 99")]
    InvalidSysnr(String),
}

/// Errors that can occur during file input/output of JSON documents
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize or parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object in {path}, found {found}")]
    NotAnObject { path: String, found: String },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
