//! RFC Invoke
//!
//! Invoke SAP remote-enabled function modules over RFC and capture
//! selected results.
//!
//! The core of this crate is the parameter marshalling and result
//! extraction engine: flat JSON import documents are validated against
//! the function module's declared interface and turned into call
//! arguments, and raw result maps are filtered through capture paths
//! such as `COMMANDNAME_LIST[NAME]` so an operator can pull a narrow
//! slice out of a large response.
//!
//! The RFC session itself sits behind the [`rfc::RfcSession`] trait, so
//! the engine is fully testable without a live SAP system.
//!
//! This crate provides the implementation for the `rfc-invoke` CLI tool.

pub mod capture;
pub mod commands;
pub mod describe;
pub mod marshal;
pub mod output;
pub mod rfc;
pub mod utils;
