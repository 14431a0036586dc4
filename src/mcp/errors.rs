//! MCP-compliant error handling
//!
//! JSON-RPC 2.0 error codes and the error object carried in responses.

use crate::error::ScoutError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP-compliant error codes following JSON-RPC 2.0 specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpErrorCode {
    // Standard JSON-RPC error codes
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,

    // Server-defined codes
    ToolNotFound = -32000,
    ToolExecutionFailed = -31999,
    ConfigurationError = -31992,
    ValidationError = -31991,
    NetworkError = -31987,
    SerializationError = -31986,
}

impl McpErrorCode {
    /// Get the error code as i32
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub fn new(code: McpErrorCode, message: String) -> Self {
        Self {
            code: code.code(),
            message,
            data: None,
        }
    }

    pub fn with_data(code: McpErrorCode, message: String, data: Value) -> Self {
        Self {
            code: code.code(),
            message,
            data: Some(data),
        }
    }

    pub fn parse_error(message: String) -> Self {
        Self::new(McpErrorCode::ParseError, message)
    }

    pub fn invalid_request(message: String) -> Self {
        Self::new(McpErrorCode::InvalidRequest, message)
    }

    pub fn method_not_found(method: String) -> Self {
        Self::with_data(
            McpErrorCode::MethodNotFound,
            format!("Method '{}' not found", method),
            serde_json::json!({ "method": method }),
        )
    }

    pub fn invalid_params(message: String) -> Self {
        Self::new(McpErrorCode::InvalidParams, message)
    }

    pub fn tool_not_found(tool_name: String) -> Self {
        Self::with_data(
            McpErrorCode::ToolNotFound,
            format!("Tool '{}' not found", tool_name),
            serde_json::json!({ "tool_name": tool_name }),
        )
    }

    /// A required tool argument is absent or has the wrong shape
    pub fn missing_argument(tool_name: &str, argument: &str) -> Self {
        Self::with_data(
            McpErrorCode::InvalidParams,
            format!("Tool '{}' requires a string argument '{}'", tool_name, argument),
            serde_json::json!({ "tool_name": tool_name, "argument": argument }),
        )
    }
}

impl std::fmt::Display for McpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Protocol-level conversion for failures that escape the tool boundary
impl From<ScoutError> for McpError {
    fn from(error: ScoutError) -> Self {
        let category = error.category();
        let code = match error {
            ScoutError::Config { .. } => McpErrorCode::ConfigurationError,
            ScoutError::Validation { .. } | ScoutError::InvalidMethod { .. } => {
                McpErrorCode::ValidationError
            }
            ScoutError::Parse { .. } | ScoutError::Serde(_) | ScoutError::Yaml(_) => {
                McpErrorCode::SerializationError
            }
            ScoutError::Http(_) | ScoutError::Fetch { .. } | ScoutError::SpecNotFound { .. } => {
                McpErrorCode::NetworkError
            }
            ScoutError::MissingPaths
            | ScoutError::PathNotFound { .. }
            | ScoutError::MethodNotSupported { .. }
            | ScoutError::Reference { .. }
            | ScoutError::CyclicReference { .. } => McpErrorCode::ToolExecutionFailed,
            ScoutError::Io(_) | ScoutError::Internal(_) => McpErrorCode::InternalError,
        };

        McpError::with_data(
            code,
            error.to_string(),
            serde_json::json!({ "category": category }),
        )
    }
}
