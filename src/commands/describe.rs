//! Describe command implementation.
//!
//! Fetches the interface metadata for a function module and prints a
//! fixed-width parameter listing.

use crate::commands::invoke::validate_function_name;
use crate::describe::describe_interface;
use crate::rfc::RfcSession;
use anyhow::{Context, Result};
use log::info;

/// Execute the describe command
///
/// **Public** - main entry point called from main.rs
pub fn execute_describe(session: &mut dyn RfcSession, function: &str) -> Result<()> {
    validate_function_name(function)?;

    info!("Describing function module '{}'", function);

    let interface = session
        .describe(function)
        .context("Failed to fetch interface metadata")?;

    let rows = describe_interface(&interface)
        .with_context(|| format!("Cannot describe '{}'", function))?;

    for row in rows {
        println!("{}", row);
    }

    Ok(())
}
