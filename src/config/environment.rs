//! Environment variable integration for apiscout configuration

use crate::config::{Config, LogFormat};
use crate::error::{Result, ScoutError};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable names used by apiscout
pub struct EnvVars;

impl EnvVars {
    pub const CONFIG_PATH: &'static str = "APISCOUT_CONFIG_PATH";
    pub const HTTP_TIMEOUT: &'static str = "APISCOUT_HTTP_TIMEOUT";
    pub const USER_AGENT: &'static str = "APISCOUT_USER_AGENT";
    pub const SPEC_PATHS: &'static str = "APISCOUT_SPEC_PATHS";
    pub const LOG_LEVEL: &'static str = "APISCOUT_LOG_LEVEL";
    pub const LOG_FORMAT: &'static str = "APISCOUT_LOG_FORMAT";
}

/// Environment configuration overrides
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOverrides {
    /// Config file path override
    pub config_path: Option<PathBuf>,
    /// HTTP timeout override (seconds)
    pub http_timeout: Option<u64>,
    /// User-Agent override
    pub user_agent: Option<String>,
    /// Comma separated specification paths
    pub spec_paths: Option<Vec<String>>,
    /// Log level override
    pub log_level: Option<String>,
    /// Log format override
    pub log_format: Option<LogFormat>,
}

impl EnvironmentOverrides {
    /// Load environment variable overrides from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build overrides from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = EnvironmentOverrides::default();

        if let Some(path_str) = lookup(EnvVars::CONFIG_PATH) {
            let path = PathBuf::from(path_str);
            debug!("Environment override: {}={:?}", EnvVars::CONFIG_PATH, path);
            overrides.config_path = Some(path);
        }

        if let Some(timeout_str) = lookup(EnvVars::HTTP_TIMEOUT) {
            match timeout_str.trim().parse::<u64>() {
                Ok(timeout) => {
                    debug!("Environment override: {}={}", EnvVars::HTTP_TIMEOUT, timeout);
                    overrides.http_timeout = Some(timeout);
                }
                Err(e) => {
                    warn!("Invalid {}: {} ({})", EnvVars::HTTP_TIMEOUT, timeout_str, e);
                    return Err(ScoutError::config(format!(
                        "Invalid {}: {} (expected a number of seconds)",
                        EnvVars::HTTP_TIMEOUT,
                        timeout_str
                    )));
                }
            }
        }

        if let Some(agent) = lookup(EnvVars::USER_AGENT) {
            debug!("Environment override: {}={}", EnvVars::USER_AGENT, agent);
            overrides.user_agent = Some(agent);
        }

        if let Some(paths_str) = lookup(EnvVars::SPEC_PATHS) {
            let paths: Vec<String> = paths_str
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            debug!("Environment override: {}={:?}", EnvVars::SPEC_PATHS, paths);
            overrides.spec_paths = Some(paths);
        }

        if let Some(level) = lookup(EnvVars::LOG_LEVEL) {
            debug!("Environment override: {}={}", EnvVars::LOG_LEVEL, level);
            overrides.log_level = Some(level);
        }

        if let Some(format_str) = lookup(EnvVars::LOG_FORMAT) {
            let format = format_str.parse::<LogFormat>().map_err(|e| {
                warn!("Invalid {}: {}", EnvVars::LOG_FORMAT, format_str);
                e
            })?;
            debug!("Environment override: {}={}", EnvVars::LOG_FORMAT, format);
            overrides.log_format = Some(format);
        }

        Ok(overrides)
    }

    /// Apply environment overrides to a config
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(timeout) = self.http_timeout {
            if config.http.timeout_seconds != timeout {
                info!(
                    "Environment override: http.timeout_seconds changed from {} to {}",
                    config.http.timeout_seconds, timeout
                );
            }
            config.http.timeout_seconds = timeout;
        }

        if let Some(ref agent) = self.user_agent {
            config.http.user_agent = agent.clone();
        }

        if let Some(ref paths) = self.spec_paths {
            info!(
                "Environment override: discovery.spec_paths replaced ({} paths)",
                paths.len()
            );
            config.discovery.spec_paths = paths.clone();
        }

        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }

        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }

    /// Get the effective config file path (with environment override)
    pub fn get_config_path(&self, default_path: &Path) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| default_path.to_path_buf())
    }

    /// Check if any environment overrides are active
    pub fn has_overrides(&self) -> bool {
        self.config_path.is_some()
            || self.http_timeout.is_some()
            || self.user_agent.is_some()
            || self.spec_paths.is_some()
            || self.log_level.is_some()
            || self.log_format.is_some()
    }

    /// Get summary of active overrides for logging
    pub fn get_override_summary(&self) -> Vec<String> {
        let mut summary = Vec::new();

        if let Some(ref path) = self.config_path {
            summary.push(format!("{}={:?}", EnvVars::CONFIG_PATH, path));
        }
        if let Some(timeout) = self.http_timeout {
            summary.push(format!("{}={}", EnvVars::HTTP_TIMEOUT, timeout));
        }
        if let Some(ref agent) = self.user_agent {
            summary.push(format!("{}={}", EnvVars::USER_AGENT, agent));
        }
        if let Some(ref paths) = self.spec_paths {
            summary.push(format!("{}={}", EnvVars::SPEC_PATHS, paths.join(",")));
        }
        if let Some(ref level) = self.log_level {
            summary.push(format!("{}={}", EnvVars::LOG_LEVEL, level));
        }
        if let Some(format) = self.log_format {
            summary.push(format!("{}={}", EnvVars::LOG_FORMAT, format));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_variables_means_no_overrides() {
        let overrides = EnvironmentOverrides::from_lookup(|_| None).unwrap();
        assert!(!overrides.has_overrides());
        assert!(overrides.get_override_summary().is_empty());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let overrides = EnvironmentOverrides::from_lookup(lookup_from(&[
            (EnvVars::HTTP_TIMEOUT, "7"),
            (EnvVars::SPEC_PATHS, "/docs.json, /openapi.yaml.json,"),
            (EnvVars::LOG_FORMAT, "json"),
        ]))
        .unwrap();

        let mut config = Config::default();
        overrides.apply_to_config(&mut config);

        assert_eq!(config.http.timeout_seconds, 7);
        assert_eq!(
            config.discovery.spec_paths,
            vec!["/docs.json".to_string(), "/openapi.yaml.json".to_string()]
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(overrides.get_override_summary().len(), 3);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result =
            EnvironmentOverrides::from_lookup(lookup_from(&[(EnvVars::HTTP_TIMEOUT, "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_override() {
        let overrides = EnvironmentOverrides::from_lookup(lookup_from(&[(
            EnvVars::CONFIG_PATH,
            "/etc/apiscout.yaml",
        )]))
        .unwrap();
        assert_eq!(
            overrides.get_config_path(Path::new("apiscout.yaml")),
            PathBuf::from("/etc/apiscout.yaml")
        );
    }
}
