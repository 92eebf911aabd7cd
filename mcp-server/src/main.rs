use anyhow::{Context, Result};
use clap::Parser;
use mcp_server::config::{Config, LogFormat};
use mcp_server::setup::initialize_app;
use mcp_server::telemetry::{init_telemetry, log_startup_info, report_error};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "matrix-mcp")]
#[command(about = "MCP server for the Matrix task board and message bus")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Matrix API base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,

    /// Log format override
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    if let Some(ref base_url) = cli.base_url {
        config.api.base_url = base_url.clone();
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        eprintln!("matrix-mcp: configuration error: {e}");
        std::process::exit(1);
    }

    log_startup_info(&config);

    let handler = match initialize_app(&config) {
        Ok(handler) => handler,
        Err(e) => {
            report_error(&e, "initialize");
            std::process::exit(1);
        }
    };

    eprintln!("matrix-mcp server running (stdio)");

    let service = match handler.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "Fatal error starting stdio transport");
            std::process::exit(1);
        }
    };

    tokio::select! {
        result = service.waiting() => {
            if let Err(e) = result {
                error!(error = %e, "MCP service terminated abnormally");
                std::process::exit(1);
            }
            info!("MCP client disconnected, shutting down");
        }
        _ = shutdown_signal() => {}
    }

    Ok(())
}
