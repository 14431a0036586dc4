//! Error types and handling for apiscout

use thiserror::Error;

/// Result type alias for apiscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Main error type for apiscout
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Every conventional path failed with a non-2xx status or a transport error
    #[error(
        "Could not find OpenAPI specification at {domain}. Tried the following paths: {}. Errors: {}",
        .tried.join(", "),
        .failures.join("; ")
    )]
    Fetch {
        domain: String,
        tried: Vec<String>,
        failures: Vec<String>,
    },

    /// At least one path answered, but nothing parsed as a specification document
    #[error(
        "Could not find OpenAPI specification at {domain}. Tried the following paths: {}. Errors: {}",
        .tried.join(", "),
        .failures.join("; ")
    )]
    SpecNotFound {
        domain: String,
        tried: Vec<String>,
        failures: Vec<String>,
    },

    /// A fetched body was not valid JSON
    #[error("Failed to parse JSON: {message}")]
    Parse { message: String },

    /// The document has no `paths` object
    #[error("OpenAPI specification does not contain paths information.")]
    MissingPaths,

    /// No path template matches the concrete path
    #[error("Path '{path}' not found in the OpenAPI specification.")]
    PathNotFound { path: String },

    /// The template exists but does not declare the requested method
    #[error("HTTP method '{method}' not supported for path '{template}'.")]
    MethodNotSupported { method: String, template: String },

    /// A `$ref` pointer could not be walked to completion
    #[error("Failed to resolve reference '{pointer}': {reason} (resolved up to '{resolved}')")]
    Reference {
        pointer: String,
        resolved: String,
        reason: String,
    },

    /// A `$ref` pointer was entered while it was already being expanded
    #[error("Cyclic reference detected: {chain}")]
    CyclicReference { chain: String },

    /// The caller asked for an HTTP method the executor cannot issue
    #[error("Invalid HTTP method: {method}. Supported methods are GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS, TRACE.")]
    InvalidMethod { method: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ScoutError {
    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a path-not-found error
    pub fn path_not_found<S: Into<String>>(path: S) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a method-not-supported error
    pub fn method_not_supported<S: Into<String>>(method: S, template: S) -> Self {
        Self::MethodNotSupported {
            method: method.into(),
            template: template.into(),
        }
    }

    /// Create a reference resolution error
    pub fn reference<S: Into<String>>(pointer: S, resolved: S, reason: S) -> Self {
        Self::Reference {
            pointer: pointer.into(),
            resolved: resolved.into(),
            reason: reason.into(),
        }
    }

    /// Create a cyclic reference error
    pub fn cyclic_reference<S: Into<String>>(chain: S) -> Self {
        Self::CyclicReference {
            chain: chain.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ScoutError::Fetch { .. } => "fetch",
            ScoutError::SpecNotFound { .. } => "spec_not_found",
            ScoutError::Parse { .. } => "parse",
            ScoutError::MissingPaths => "missing_paths",
            ScoutError::PathNotFound { .. } => "path_not_found",
            ScoutError::MethodNotSupported { .. } => "method_not_supported",
            ScoutError::Reference { .. } => "reference",
            ScoutError::CyclicReference { .. } => "cyclic_reference",
            ScoutError::InvalidMethod { .. } => "invalid_method",
            ScoutError::Config { .. } => "config",
            ScoutError::Validation { .. } => "validation",
            ScoutError::Io(_) => "io",
            ScoutError::Serde(_) => "serialization",
            ScoutError::Yaml(_) => "yaml",
            ScoutError::Http(_) => "http",
            ScoutError::Internal(_) => "internal",
        }
    }

    /// Render the error the way tool results carry it
    pub fn to_tool_text(&self) -> String {
        format!("Error: {}", self)
    }
}
