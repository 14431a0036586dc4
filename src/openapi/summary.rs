//! Endpoint listing returned by `getApiSpecification`

use crate::http::HttpMethod;
use crate::openapi::document::SpecDocument;
use crate::utils::display_value;
use serde_json::Value;

/// Render the document's info block and every operation under its path
pub fn summarize(document: &SpecDocument, domain: &str) -> String {
    let mut out = format!("# API Specification for {}\n\n", domain);

    if let Some(info) = document.info() {
        if let Some(title) = info.get("title") {
            out.push_str(&format!("## {}\n\n", display_value(title)));
        }
        if let Some(description) = info.get("description") {
            out.push_str(&format!("{}\n\n", display_value(description)));
        }
        if let Some(version) = info.get("version") {
            out.push_str(&format!("API Version: {}\n\n", display_value(version)));
        }
    }

    if let Some(format) = document.format_label() {
        out.push_str(&format!("Specification: {} ({})\n\n", format, document.source_url()));
    }

    let paths = match document.paths() {
        Some(paths) => paths,
        None => return out,
    };

    out.push_str("## Available Endpoints\n\n");
    for (template, item) in paths {
        out.push_str(&format!("### {}\n\n", template));

        let operations = match item.as_object() {
            Some(operations) => operations,
            None => continue,
        };

        // Path items also carry `parameters`, `summary`, `servers`, ...
        for (key, operation) in operations {
            if !is_method_key(key) {
                continue;
            }

            out.push_str(&format!("#### {}\n\n", key.to_uppercase()));
            if let Some(summary) = operation.get("summary").and_then(Value::as_str) {
                out.push_str(&format!("{}\n\n", summary));
            }
            if let Some(description) = operation.get("description").and_then(Value::as_str) {
                out.push_str(&format!("{}\n\n", description));
            }
            out.push_str("*For detailed parameter and response information, use the analyzeEndpoint function with this path.*\n\n");
        }
    }

    out
}

fn is_method_key(key: &str) -> bool {
    HttpMethod::all().iter().any(|m| m.spec_key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_layout() {
        let document = SpecDocument::new(
            "https://pets.io/openapi.json",
            json!({
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "description": "Pets for all", "version": "1.2"},
                "paths": {
                    "/pets": {
                        "parameters": [{"name": "trace", "in": "header"}],
                        "get": {"summary": "List pets"},
                        "post": {"description": "Create a pet"}
                    },
                    "/pets/{petId}": {"delete": {}}
                }
            }),
        );

        let text = summarize(&document, "https://pets.io");
        assert!(text.starts_with("# API Specification for https://pets.io\n\n## Petstore\n\nPets for all\n\nAPI Version: 1.2\n\n"));
        assert!(text.contains("Specification: OpenAPI 3.0.0 (https://pets.io/openapi.json)"));
        assert!(text.contains("## Available Endpoints\n\n### /pets\n\n#### GET\n\nList pets\n\n*For detailed"));
        assert!(text.contains("#### POST\n\nCreate a pet\n\n"));
        assert!(text.contains("### /pets/{petId}\n\n#### DELETE\n\n"));
        assert!(!text.contains("#### PARAMETERS"));

        let get = text.find("#### GET").unwrap();
        let post = text.find("#### POST").unwrap();
        assert!(get < post);
    }

    #[test]
    fn test_document_without_paths() {
        let document = SpecDocument::new("https://x.io/api-docs", json!({"info": {"version": 3}}));
        let text = summarize(&document, "https://x.io");
        assert!(text.contains("API Version: 3"));
        assert!(!text.contains("Available Endpoints"));
    }
}
