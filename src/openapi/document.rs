//! A fetched OpenAPI document

use crate::openapi::resolver::RefResolver;
use serde_json::{Map, Value};

/// Parsed specification for one analysis call; never cached across calls
#[derive(Debug, Clone)]
pub struct SpecDocument {
    source_url: String,
    root: Value,
}

impl SpecDocument {
    pub fn new<S: Into<String>>(source_url: S, root: Value) -> Self {
        Self {
            source_url: source_url.into(),
            root,
        }
    }

    /// URL the document was fetched from
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The `paths` object, in declared order
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    pub fn info(&self) -> Option<&Map<String, Value>> {
        self.root.get("info").and_then(Value::as_object)
    }

    /// `OpenAPI 3.x` or `Swagger 2.0`, when the document declares it
    pub fn format_label(&self) -> Option<String> {
        if let Some(version) = self.root.get("openapi").and_then(Value::as_str) {
            return Some(format!("OpenAPI {}", version));
        }
        self.root
            .get("swagger")
            .and_then(Value::as_str)
            .map(|version| format!("Swagger {}", version))
    }

    /// Document-level `consumes` list (Swagger 2.0)
    pub fn consumes(&self) -> Vec<&str> {
        string_list(self.root.get("consumes"))
    }

    pub fn resolver(&self) -> RefResolver<'_> {
        RefResolver::new(&self.root)
    }
}

/// Collect the string entries of an optional JSON array
pub(crate) fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
