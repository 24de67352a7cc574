//! Interface metadata and wire types for the RFC gateway.
//!
//! The metadata model mirrors what an RFC function interface declares:
//! an ordered list of named parameters, each with a direction
//! (IMPORT/EXPORT/CHANGING/TABLES) and a kind (scalar value or table of
//! rows). The gateway speaks JSON-RPC 2.0, so the envelope types here
//! follow that spec.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenient alias for the JSON object maps used throughout:
/// import documents, call arguments, result maps, output documents.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Parameter direction in an RFC interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Import,
    Export,
    Changing,
    Tables,
}

impl Direction {
    /// Whether a caller may supply a value for this parameter.
    /// Only EXPORT parameters are output-only.
    pub fn is_writable(self) -> bool {
        !matches!(self, Direction::Export)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Import => "IMPORT",
            Direction::Export => "EXPORT",
            Direction::Changing => "CHANGING",
            Direction::Tables => "TABLES",
        };
        f.write_str(s)
    }
}

/// Whether a parameter holds a single value or a sequence of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParamKind {
    Scalar,
    Table,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Scalar => "SCALAR",
            ParamKind::Table => "TABLE",
        };
        f.write_str(s)
    }
}

/// One field of a structure or table row type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(default, rename = "type")]
    pub type_name: Option<String>,

    #[serde(default)]
    pub length: Option<u32>,

    #[serde(default)]
    pub decimals: Option<u32>,
}

/// One declared parameter of a function interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,

    pub direction: Direction,

    pub kind: ParamKind,

    /// ABAP type name (e.g. CHAR, BAPIRET2), when the gateway exposes it
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub default_value: Option<String>,

    /// Row or structure schema, when the gateway exposes one
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// The declared interface of one function module, in declaration order.
/// Sourced from the gateway; immutable for the lifetime of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceMetadata {
    pub function: String,

    pub parameters: Vec<ParameterDescriptor>,
}

impl InterfaceMetadata {
    /// Look up a parameter descriptor by exact name
    pub fn find(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: String,
    pub id: u64,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
