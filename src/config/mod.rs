//! Configuration module for apiscout
//!
//! This module provides configuration management and loading utilities.

mod config;
mod environment;

pub use config::{
    CliOverrides, Config, DiscoveryConfig, HttpClientConfig, LogFormat, LoggingConfig,
    ServerConfig, DEFAULT_SPEC_PATHS,
};
pub use environment::{EnvVars, EnvironmentOverrides};
