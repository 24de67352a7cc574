//! RFC Invoke CLI
//!
//! Invokes remote-enabled function modules on an SAP system and reports
//! selected results. Connection parameters come from an INI-style
//! connection file (`--connection` / `--dest`) or from direct flags.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use rfc_invoke::commands::{execute_describe, execute_invoke, InvokeArgs};
use rfc_invoke::rfc::session::GatewayClient;
use rfc_invoke::rfc::RfcSession;
use rfc_invoke::utils::config::{validate_sysnr, ConnectionFile, ConnectionParams};

/// Invoke SAP remote-enabled function modules via RFC
#[derive(Parser, Debug)]
#[command(name = "rfc-invoke")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an INI-style connection file
    #[arg(long = "connection", value_name = "FILE")]
    connection: Option<PathBuf>,

    /// Destination name to select within the connection file
    #[arg(long)]
    dest: Option<String>,

    /// SAP username (required without --connection)
    #[arg(short, long)]
    user: Option<String>,

    /// SAP password (required without --connection)
    #[arg(short, long, env = "RFC_INVOKE_PASSWORD")]
    password: Option<String>,

    /// SAP application server hostname or IP (required without --connection)
    #[arg(short, long)]
    target: Option<String>,

    /// SAP client number (required without --connection)
    #[arg(short, long)]
    client: Option<String>,

    /// SAP system number
    #[arg(short, long, default_value = "00")]
    sysnr: String,

    /// SAP router string
    #[arg(short = 'r', long)]
    saprouter: Option<String>,

    /// Function module name to call
    #[arg(short, long)]
    function: String,

    /// Path to JSON file with import parameters
    #[arg(short, long)]
    import: Option<PathBuf>,

    /// Path to JSON file specifying which results to capture
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Show the function module's interface instead of calling it
    #[arg(short, long)]
    desc: bool,

    /// Also write the output document to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let params = resolve_connection(&cli)?;

    let mut session = GatewayClient::connect(&params).context("Failed to open RFC session")?;

    // Run the command, then release the session on both paths
    let outcome = if cli.desc {
        execute_describe(&mut session, &cli.function)
    } else {
        let args = InvokeArgs {
            function: cli.function.clone(),
            import_path: cli.import.clone(),
            export_path: cli.export.clone(),
            output_path: cli.output.clone(),
        };
        execute_invoke(&mut session, &args)
    };

    session.close();
    outcome
}

/// Resolve connection parameters from the connection file or direct flags
fn resolve_connection(cli: &Cli) -> Result<ConnectionParams> {
    if let Some(path) = &cli.connection {
        let file = ConnectionFile::load(path)
            .with_context(|| format!("Failed to load connection file {}", path.display()))?;
        return file
            .resolve(cli.dest.as_deref())
            .context("Failed to resolve destination");
    }

    validate_sysnr(&cli.sysnr)?;

    match (&cli.user, &cli.password, &cli.target, &cli.client) {
        (Some(user), Some(password), Some(target), Some(client)) => Ok(ConnectionParams {
            user: user.clone(),
            passwd: password.clone(),
            ashost: target.clone(),
            client: client.clone(),
            sysnr: cli.sysnr.clone(),
            lang: None,
            saprouter: cli.saprouter.clone(),
        }),
        _ => anyhow::bail!(
            "When --connection is not given, --user, --password, --target, and --client are required"
        ),
    }
}
