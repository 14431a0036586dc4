//! Shared utilities for apiscout
//!
//! JSON handling and URL/path normalization used by both the HTTP executor and
//! the OpenAPI engine.

pub mod json_codec;
pub mod urls;

pub use json_codec::{display_value, json_kind, JsonCodec};
pub use urls::{build_url, normalize_path, normalize_url};
