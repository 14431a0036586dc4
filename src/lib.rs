//! apiscout - OpenAPI discovery and analysis tools for LLM agents
//!
//! Exposes a Model Context Protocol server whose tools locate a domain's
//! OpenAPI/Swagger document, explain individual endpoints (parameters, body
//! schemas, synthesized examples) and issue live HTTP calls.

pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod openapi;
pub mod startup;
pub mod utils;

pub use config::Config;
pub use error::{Result, ScoutError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "apiscout.yaml";
