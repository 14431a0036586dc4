//! JSON encoding and decoding shared by the HTTP executor and the OpenAPI engine
//!
//! Components receive a `JsonCodec` at construction instead of calling into a
//! process-wide mapper.

use crate::error::{Result, ScoutError};
use serde_json::{Map, Value};

/// JSON parse/render capability
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// Parse arbitrary JSON text
    pub fn parse(&self, text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| ScoutError::parse(e.to_string()))
    }

    /// Parse JSON text that must be an object at the top level
    pub fn parse_object(&self, text: &str) -> Result<Map<String, Value>> {
        match self.parse(text)? {
            Value::Object(map) => Ok(map),
            other => Err(ScoutError::parse(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Render a value as indented JSON
    pub fn render(&self, value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }

    /// Parse a `{"key": "value"}` argument into ordered pairs.
    ///
    /// `None`, blank text, `"{}"` and `"null"` all mean "no entries". Non-string
    /// values are kept as their JSON text.
    pub fn parse_string_map(&self, raw: Option<&str>) -> Result<Vec<(String, String)>> {
        let text = match raw.map(str::trim) {
            None | Some("") | Some("{}") | Some("null") => return Ok(Vec::new()),
            Some(text) => text,
        };

        let map = self.parse_object(text)?;
        Ok(map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect())
    }
}

/// Short name of a JSON value's kind, used in diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text form of a JSON value as it appears inline in analysis output
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
