//! Configuration management for apiscout

use crate::config::environment::EnvironmentOverrides;
use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Conventional locations of an OpenAPI document, most common first
pub const DEFAULT_SPEC_PATHS: [&str; 7] = [
    "/openapi.json",
    "/swagger.json",
    "/api-docs",
    "/v3/api-docs",
    "/swagger/v1/swagger.json",
    "/api/v3/api-docs",
    "/api/swagger.json",
];

fn default_server_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// MCP server identity
    pub server: ServerConfig,
    /// Outbound HTTP client settings
    pub http: HttpClientConfig,
    /// Specification discovery settings
    pub discovery: DiscoveryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server identity reported during the MCP handshake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Name advertised in `serverInfo`
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Whether redirects are followed (up to 10 hops)
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: default_user_agent(),
            follow_redirects: true,
        }
    }
}

/// Specification discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Suffix paths tried in order until one yields a specification
    pub spec_paths: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            spec_paths: DEFAULT_SPEC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ScoutError::config(format!(
                "Invalid log format: {} (valid options: text, json)",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (RUST_LOG takes precedence)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Values supplied on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub http_timeout: Option<u64>,
}

impl Config {
    /// Load .env files in order of precedence
    fn load_env_files() {
        let env = std::env::var("APISCOUT_ENV").unwrap_or_else(|_| "development".to_string());

        let env_specific_file = format!(".env.{}", env);
        let env_files = [".env", env_specific_file.as_str(), ".env.local"];

        for env_file in env_files {
            match dotenvy::from_filename(env_file) {
                Ok(_) => {
                    tracing::info!("Loaded environment variables from {}", env_file);
                }
                Err(e) if e.not_found() => {
                    tracing::debug!("No {} file found, skipping", env_file);
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", env_file, e);
                }
            }
        }
    }

    /// Load configuration: defaults < .env < file < environment < CLI
    pub fn load<P: AsRef<Path>>(path: P, cli: &CliOverrides) -> Result<Self> {
        Self::load_env_files();

        let overrides = EnvironmentOverrides::load()?;
        let path = overrides.get_config_path(path.as_ref());

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::warn!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        overrides.apply_to_config(&mut config);
        config.apply_cli_overrides(cli);

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration file without consulting the environment
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ScoutError::config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ScoutError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply command line overrides (highest precedence)
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref level) = cli.log_level {
            self.logging.level = level.clone();
        }
        if let Some(timeout) = cli.http_timeout {
            self.http.timeout_seconds = timeout;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(ScoutError::config("HTTP timeout cannot be 0"));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ScoutError::config("HTTP user agent cannot be empty"));
        }

        if self.discovery.spec_paths.is_empty() {
            return Err(ScoutError::config(
                "At least one specification path must be configured for discovery",
            ));
        }

        if let Some(bad) = self
            .discovery
            .spec_paths
            .iter()
            .find(|p| !p.starts_with('/'))
        {
            return Err(ScoutError::config(format!(
                "Specification path '{}' must start with '/'",
                bad
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ScoutError::config("Log level cannot be empty"));
        }

        Ok(())
    }
}
