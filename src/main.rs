use anyhow::Result;
use apiscout::config::{CliOverrides, Config, EnvironmentOverrides};
use apiscout::mcp::McpServer;
use apiscout::startup::{init_logging, StartupInfo, StartupLogger};
use apiscout::{DEFAULT_CONFIG_FILE, VERSION};
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Outbound HTTP timeout in seconds; overrides the config file
    #[arg(long)]
    http_timeout: Option<u64>,

    /// Run as single-shot MCP client: read one request from stdin, answer it and exit
    #[arg(long)]
    mcp_client: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        http_timeout: cli.http_timeout,
    };
    let config = Config::load(&cli.config, &overrides)?;

    init_logging(&config.logging)?;

    let env_overrides = EnvironmentOverrides::load()?;
    let config_path = env_overrides.get_config_path(&cli.config);
    StartupLogger::display_startup_info(
        &StartupInfo {
            config: &config,
            config_path: config_path.exists().then_some(config_path),
            env_overrides: &env_overrides,
            single_shot: cli.mcp_client,
        },
        VERSION,
    );

    let server = McpServer::from_config(&config).map_err(|e| {
        error!("Failed to create MCP server: {}", e);
        e
    })?;

    if cli.mcp_client {
        server.run_single().await?;
    } else {
        server.run_stdio().await?;
    }

    Ok(())
}
