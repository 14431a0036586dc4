//! Model Context Protocol surface
//!
//! JSON-RPC 2.0 over newline-delimited stdio, exposing the API discovery
//! operations as tools.

pub mod errors;
pub mod server;
pub mod tools;
pub mod types;

pub use errors::{McpError, McpErrorCode};
pub use server::McpServer;
pub use tools::{tool_definitions, ToolDispatcher};
pub use types::*;
