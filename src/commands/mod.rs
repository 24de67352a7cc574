//! Command implementations for the CLI.

pub mod describe;
pub mod invoke;

pub use describe::execute_describe;
pub use invoke::{execute_invoke, validate_function_name, InvokeArgs};
