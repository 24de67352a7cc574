//! Selective result capture.
//!
//! This module handles:
//! - Parsing capture paths (`NAME`, `NAME[FIELD]`)
//! - Filtering result maps through an export spec

pub mod extractor;
pub mod path;

// Re-export main types
pub use extractor::{extract, ExportSpec};
pub use path::PathExpr;
