//! Tool catalogue and dispatch

use crate::mcp::errors::McpError;
use crate::mcp::types::{Tool, ToolCall, ToolResult};
use crate::openapi::EndpointAnalyzer;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

pub const GET_API_SPECIFICATION: &str = "getApiSpecification";
pub const ANALYZE_ENDPOINT: &str = "analyzeEndpoint";
pub const ANALYZE_AND_CALL: &str = "analyzeAndCall";
pub const MAKE_REQUEST: &str = "makeRequest";
pub const MAKE_GET_REQUEST: &str = "makeGetRequest";
pub const MAKE_POST_REQUEST: &str = "makePostRequest";

fn string_property(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

/// Accepts JSON text or an inline JSON value
fn json_property(description: &str) -> Value {
    json!({"type": ["string", "object", "array", "null"], "description": description})
}

fn input_schema(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

const DOMAIN_DESCRIPTION: &str =
    "The domain where the API is hosted, with or without protocol (e.g., 'api.example.com')";
const PATH_DESCRIPTION: &str = "The path to the API endpoint (e.g., '/pets/{petId}' or '/pets/123')";
const METHOD_DESCRIPTION: &str = "The HTTP method (GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS, TRACE)";
const URL_DESCRIPTION: &str =
    "The full URL to make the request to (e.g., 'https://api.example.com/resource')";
const QUERY_DESCRIPTION: &str =
    "Optional query parameters as a JSON object (e.g., {\"limit\": \"10\"})";
const BODY_DESCRIPTION: &str = "Optional request body as JSON (sent for POST, PUT, PATCH)";
const HEADERS_DESCRIPTION: &str =
    "Optional headers as a JSON object (e.g., {\"Authorization\": \"Bearer token\"})";

/// Every tool this server exposes
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            GET_API_SPECIFICATION,
            "Discover and fetch the REST API specification from a domain using OpenAPI. \
             Returns the available endpoints and methods. \
             Example: getApiSpecification(\"petstore.swagger.io\")",
            input_schema(vec![("domainUrl", string_property(DOMAIN_DESCRIPTION))], &["domainUrl"]),
        ),
        Tool::new(
            ANALYZE_ENDPOINT,
            "Analyze an endpoint to determine its parameters and body requirements. \
             Returns path, query and header parameters, the request body schema, example values \
             and a ready-to-edit call. \
             Example: analyzeEndpoint(\"petstore.swagger.io\", \"/v2/pet/{petId}\", \"GET\")",
            input_schema(
                vec![
                    ("domainUrl", string_property(DOMAIN_DESCRIPTION)),
                    ("path", string_property(PATH_DESCRIPTION)),
                    ("method", string_property(METHOD_DESCRIPTION)),
                ],
                &["domainUrl", "path", "method"],
            ),
        ),
        Tool::new(
            ANALYZE_AND_CALL,
            "Analyze an endpoint and make a request to it in one operation. \
             Returns both the endpoint analysis and the API response. \
             Example: analyzeAndCall(\"petstore.swagger.io\", \"/v2/pet/1\", \"GET\", null, null, {\"api_key\": \"special-key\"})",
            input_schema(
                vec![
                    ("domainUrl", string_property(DOMAIN_DESCRIPTION)),
                    ("path", string_property(PATH_DESCRIPTION)),
                    ("method", string_property(METHOD_DESCRIPTION)),
                    ("queryParams", json_property(QUERY_DESCRIPTION)),
                    ("body", json_property(BODY_DESCRIPTION)),
                    ("headers", json_property(HEADERS_DESCRIPTION)),
                ],
                &["domainUrl", "path", "method"],
            ),
        ),
        Tool::new(
            MAKE_REQUEST,
            "Make an HTTP request to a URI. Returns the response with status code and body.",
            input_schema(
                vec![
                    ("url", string_property(URL_DESCRIPTION)),
                    ("method", string_property(METHOD_DESCRIPTION)),
                    ("queryParams", json_property(QUERY_DESCRIPTION)),
                    ("body", json_property(BODY_DESCRIPTION)),
                    ("headers", json_property(HEADERS_DESCRIPTION)),
                ],
                &["url", "method"],
            ),
        ),
        Tool::new(
            MAKE_GET_REQUEST,
            "Make a GET request to a URI. Returns the response with status code and body.",
            input_schema(
                vec![
                    ("url", string_property(URL_DESCRIPTION)),
                    ("queryParams", json_property(QUERY_DESCRIPTION)),
                    ("headers", json_property(HEADERS_DESCRIPTION)),
                ],
                &["url"],
            ),
        ),
        Tool::new(
            MAKE_POST_REQUEST,
            "Make a POST request to a URI. Returns the response with status code and body.",
            input_schema(
                vec![
                    ("url", string_property(URL_DESCRIPTION)),
                    ("queryParams", json_property(QUERY_DESCRIPTION)),
                    ("body", json_property(BODY_DESCRIPTION)),
                    ("headers", json_property(HEADERS_DESCRIPTION)),
                ],
                &["url"],
            ),
        ),
    ]
}

/// Named arguments of one tool call
struct ToolArguments<'a> {
    tool: &'a str,
    values: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArguments<'a> {
    fn new(call: &'a ToolCall) -> Self {
        Self {
            tool: &call.name,
            values: call.arguments.as_object(),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.and_then(|values| values.get(name))
    }

    fn required(&self, name: &str) -> Result<&'a str, McpError> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::missing_argument(self.tool, name))
    }

    /// JSON-valued argument as text; strings pass through, null means absent
    fn optional_json(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Dispatches tool calls onto the analyzer and request tools
#[derive(Clone)]
pub struct ToolDispatcher {
    analyzer: EndpointAnalyzer,
}

impl ToolDispatcher {
    pub fn new(analyzer: EndpointAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        tool_definitions()
    }

    /// Run a tool. Protocol problems are errors; tool failures are `isError` results.
    pub async fn call_tool(&self, call: &ToolCall) -> Result<ToolResult, McpError> {
        info!("Calling tool: {}", call.name);
        let args = ToolArguments::new(call);
        let requests = self.analyzer.requests();

        let text = match call.name.as_str() {
            GET_API_SPECIFICATION => {
                self.analyzer
                    .get_api_specification(args.required("domainUrl")?)
                    .await
            }
            ANALYZE_ENDPOINT => {
                self.analyzer
                    .analyze_endpoint(
                        args.required("domainUrl")?,
                        args.required("path")?,
                        args.required("method")?,
                    )
                    .await
            }
            ANALYZE_AND_CALL => {
                let query = args.optional_json("queryParams");
                let body = args.optional_json("body");
                let headers = args.optional_json("headers");
                self.analyzer
                    .analyze_and_call(
                        args.required("domainUrl")?,
                        args.required("path")?,
                        args.required("method")?,
                        query.as_deref(),
                        body.as_deref(),
                        headers.as_deref(),
                    )
                    .await
            }
            MAKE_REQUEST => {
                let query = args.optional_json("queryParams");
                let body = args.optional_json("body");
                let headers = args.optional_json("headers");
                requests
                    .make_request(
                        args.required("url")?,
                        args.required("method")?,
                        query.as_deref(),
                        body.as_deref(),
                        headers.as_deref(),
                    )
                    .await
            }
            MAKE_GET_REQUEST => {
                let query = args.optional_json("queryParams");
                let headers = args.optional_json("headers");
                requests
                    .make_get_request(args.required("url")?, query.as_deref(), headers.as_deref())
                    .await
            }
            MAKE_POST_REQUEST => {
                let query = args.optional_json("queryParams");
                let body = args.optional_json("body");
                let headers = args.optional_json("headers");
                requests
                    .make_post_request(
                        args.required("url")?,
                        query.as_deref(),
                        body.as_deref(),
                        headers.as_deref(),
                    )
                    .await
            }
            other => return Err(McpError::tool_not_found(other.to_string())),
        };

        let result = ToolResult::from_text(text);
        debug!("Tool {} finished (isError: {})", call.name, result.is_error);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_names_are_unique() {
        let tools = tool_definitions();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_analyze_and_call_schema() {
        let tools = tool_definitions();
        let tool = tools.iter().find(|t| t.name == ANALYZE_AND_CALL).unwrap();
        assert_eq!(
            tool.input_schema["required"],
            json!(["domainUrl", "path", "method"])
        );
        let keys: Vec<&String> = tool.input_schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(
            keys,
            vec!["domainUrl", "path", "method", "queryParams", "body", "headers"]
        );
    }

    #[test]
    fn test_argument_extraction() {
        let call = ToolCall::new(
            MAKE_REQUEST.to_string(),
            json!({
                "url": "https://a.io",
                "queryParams": {"limit": 5},
                "body": "{\"a\":1}",
                "headers": null
            }),
        );
        let args = ToolArguments::new(&call);
        assert_eq!(args.required("url").unwrap(), "https://a.io");
        assert_eq!(args.optional_json("queryParams").as_deref(), Some(r#"{"limit":5}"#));
        assert_eq!(args.optional_json("body").as_deref(), Some("{\"a\":1}"));
        assert_eq!(args.optional_json("headers"), None);

        let err = args.required("method").unwrap_err();
        assert_eq!(err.code, -32602);
    }
}
