//! Invoke command implementation.
//!
//! The invoke command:
//! 1. Loads the import document (if any)
//! 2. Fetches interface metadata for the function module
//! 3. Marshals the import document into call arguments
//! 4. Calls the function module
//! 5. Filters the result through the export spec
//! 6. Prints the output document (and optionally writes it to a file)

use crate::capture::{extract, ExportSpec};
use crate::marshal::build_call_args;
use crate::output::{document_to_string, read_export_spec, read_json_object, write_document};
use crate::rfc::types::JsonMap;
use crate::rfc::RfcSession;
use crate::utils::config::MAX_FUNCTION_NAME_LEN;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the invoke command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct InvokeArgs {
    /// Function module name to call
    pub function: String,

    /// Path to the import JSON document (parameter name -> value)
    pub import_path: Option<PathBuf>,

    /// Path to the export spec JSON (`{"capture": [...]}`)
    pub export_path: Option<PathBuf>,

    /// Optional path to also write the output document to
    pub output_path: Option<PathBuf>,
}

/// Execute the invoke command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Import/export file read errors
/// * Marshalling errors (unknown/unwritable parameters, bad table shapes)
/// * Session errors from the gateway
/// * Extraction errors (malformed paths, field access on non-tables)
pub fn execute_invoke(session: &mut dyn RfcSession, args: &InvokeArgs) -> Result<()> {
    let start_time = Instant::now();

    validate_function_name(&args.function)?;

    info!("Starting invocation of '{}'", args.function);

    // Step 1: Load import document
    let import_doc = match &args.import_path {
        Some(path) => {
            info!("Step 1/5: Loading import document...");
            read_json_object(path)
                .with_context(|| format!("Failed to read import file {}", path.display()))?
        }
        None => {
            info!("Step 1/5: No import file, calling with no parameters");
            JsonMap::new()
        }
    };

    // Step 2: Fetch interface metadata
    info!("Step 2/5: Fetching interface metadata...");
    let interface = session
        .describe(&args.function)
        .context("Failed to fetch interface metadata")?;

    debug!(
        "Interface declares {} parameters",
        interface.parameters.len()
    );

    // Step 3: Marshal call arguments
    info!("Step 3/5: Marshalling call arguments...");
    let call_args = build_call_args(&import_doc, &interface)
        .context("Failed to marshal import document")?;

    // Step 4: Call the function module
    info!("Step 4/5: Calling function module...");
    let result = session
        .call(&args.function, &call_args)
        .with_context(|| format!("Call to '{}' failed", args.function))?;

    debug!("Result map has {} parameters", result.len());

    // Step 5: Extract and report
    info!("Step 5/5: Extracting captured results...");
    let spec = load_export_spec(args)?;
    let output = extract(&result, &spec).context("Failed to extract results")?;

    let rendered = document_to_string(&output).context("Failed to serialize output document")?;
    println!("{}", rendered);

    if let Some(path) = &args.output_path {
        write_document(&output, path)
            .with_context(|| format!("Failed to write output file {}", path.display()))?;
        info!("Output document written to: {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Invocation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Load the export spec, defaulting to capture-everything
///
/// **Private** - internal helper for execute_invoke
fn load_export_spec(args: &InvokeArgs) -> Result<ExportSpec> {
    match &args.export_path {
        Some(path) => read_export_spec(path)
            .with_context(|| format!("Failed to read export file {}", path.display())),
        None => Ok(ExportSpec::default()),
    }
}

/// Validate a function module name before any network traffic
///
/// **Public** - can be called before opening a session for early validation
pub fn validate_function_name(function: &str) -> Result<()> {
    if function.is_empty() {
        anyhow::bail!("Function name cannot be empty");
    }

    if function.len() > MAX_FUNCTION_NAME_LEN {
        anyhow::bail!(
            "Function name is too long (max {} characters)",
            MAX_FUNCTION_NAME_LEN
        );
    }

    if function.chars().any(char::is_whitespace) {
        anyhow::bail!("Function name cannot contain whitespace");
    }

    Ok(())
}
