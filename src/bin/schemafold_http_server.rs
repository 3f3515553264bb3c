use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;

use schemafold::permissions::LoggingActionRegistrar;
use schemafold::reload::LoggingReloadTrigger;
use schemafold::telemetry::LoggingTelemetryReporter;
use schemafold::{load_node_config, SchemaFoldHttpServer, SchemaFoldNode};

/// Command line options for the HTTP server binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Port for the HTTP server
    #[arg(long, default_value_t = 1337)]
    port: u16,

    /// Path to the node configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main entry point for the SchemaFold HTTP server.
///
/// Starts a standalone schema-builder node and serves the REST API for
/// content types, components, and component categories. Without a real
/// platform around it, reloads, telemetry, and permission registration go
/// to logging stand-ins.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting SchemaFold HTTP server...");

    let Cli { port, config } = Cli::parse();

    let config = load_node_config(config.as_deref())?;
    info!("Config loaded successfully");

    let node = Arc::new(SchemaFoldNode::new(
        config,
        Arc::new(LoggingReloadTrigger),
        Arc::new(LoggingTelemetryReporter),
        &LoggingActionRegistrar,
    )?);

    let bind_address = format!("127.0.0.1:{}", port);
    info!("Starting HTTP server on {}...", bind_address);
    SchemaFoldHttpServer::new(node, &bind_address).run().await?;

    Ok(())
}
