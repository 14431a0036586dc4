//! Logging setup and the startup report

use crate::config::{Config, EnvironmentOverrides, LogFormat, LoggingConfig};
use crate::error::{Result, ScoutError};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr; stdout carries protocol traffic only.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ScoutError::config(format!("Failed to initialize logging: {}", e)))
}

/// Facts about how the configuration was assembled
pub struct StartupInfo<'a> {
    pub config: &'a Config,
    pub config_path: Option<PathBuf>,
    pub env_overrides: &'a EnvironmentOverrides,
    pub single_shot: bool,
}

/// Startup logger for configuration and runtime information
pub struct StartupLogger;

impl StartupLogger {
    pub fn display_startup_info(info: &StartupInfo<'_>, version: &str) {
        info!("apiscout v{} starting...", version);

        Self::display_configuration(info);

        if info.env_overrides.has_overrides() {
            Self::display_environment_overrides(info.env_overrides);
        }

        Self::display_discovery(info.config);

        let mode = if info.single_shot { "single-shot" } else { "stdio" };
        info!("apiscout ready in {} mode as '{}'", mode, info.config.server.name);
    }

    fn display_configuration(info: &StartupInfo<'_>) {
        info!("Configuration:");
        match &info.config_path {
            Some(path) => info!("   Config file: {:?}", path),
            None => info!("   Config file: built-in defaults (no config file found)"),
        }
        info!("   HTTP timeout: {}s", info.config.http.timeout_seconds);
        info!("   User-Agent: {}", info.config.http.user_agent);
        if !info.config.http.follow_redirects {
            warn!("   Redirects are disabled; specifications behind redirects will not be found");
        }
        info!(
            "   Logging: {} ({})",
            info.config.logging.level, info.config.logging.format
        );
    }

    fn display_environment_overrides(overrides: &EnvironmentOverrides) {
        info!("Environment overrides:");
        for line in overrides.get_override_summary() {
            info!("   {}", line);
        }
    }

    fn display_discovery(config: &Config) {
        info!(
            "Specification lookup order ({} paths): {}",
            config.discovery.spec_paths.len(),
            config.discovery.spec_paths.join(", ")
        );
    }
}
