//! Endpoint analysis and live calls against a mock API

use apiscout::config::{HttpClientConfig, DEFAULT_SPEC_PATHS};
use apiscout::http::ReqwestExecutor;
use apiscout::openapi::EndpointAnalyzer;
use apiscout::utils::JsonCodec;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analyzer() -> EndpointAnalyzer {
    let executor = ReqwestExecutor::new(&HttpClientConfig::default()).unwrap();
    EndpointAnalyzer::new(
        Arc::new(executor),
        JsonCodec::new(),
        DEFAULT_SPEC_PATHS.iter().map(|p| p.to_string()).collect(),
    )
}

async fn serve_spec(mock_server: &MockServer, spec: Value) {
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(spec))
        .mount(mock_server)
        .await;
}

fn search_spec() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {"title": "Search", "version": "1"},
        "paths": {
            "/search": {
                "get": {
                    "summary": "Search things",
                    "parameters": [
                        {"name": "q", "in": "query", "required": true, "schema": {"type": "integer"}}
                    ]
                }
            },
            "/pets/{petId}": {
                "get": {
                    "summary": "Find pet",
                    "parameters": [
                        {"name": "petId", "in": "path", "required": true, "schema": {"type": "string"}}
                    ]
                }
            }
        }
    })
}

#[tokio::test]
async fn test_query_parameter_analysis_and_call() {
    let mock_server = MockServer::start().await;
    serve_spec(&mock_server, search_spec()).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [1, 2]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let analyzer = analyzer();
    let analysis = analyzer
        .analyze_endpoint(&mock_server.uri(), "/search", "GET")
        .await;
    assert!(analysis.starts_with("# Endpoint Analysis: GET /search\n\n## Overview\n\nSearch things\n\n"));
    assert!(analysis.contains(
        "## Parameters\n\n### Query Parameters\n\n- **q** (integer, **Required**)\n  - Example: `42`\n"
    ));

    let text = analyzer
        .analyze_and_call(
            &mock_server.uri(),
            "/search",
            "GET",
            Some(r#"{"q": "42"}"#),
            None,
            None,
        )
        .await;
    assert!(text.starts_with("# Endpoint Analysis\n\n# Endpoint Analysis: GET /search"));
    assert!(text.contains(
        "# API Response\n\nStatus Code: 200\n\nResponse Body:\n{\n  \"results\": [\n    1,\n    2\n  ]\n}"
    ));
}

#[tokio::test]
async fn test_failed_live_call_keeps_analysis() {
    let mock_server = MockServer::start().await;
    serve_spec(&mock_server, search_spec()).await;

    Mock::given(method("GET"))
        .and(path("/pets/7"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&mock_server)
        .await;

    let text = analyzer()
        .analyze_and_call(&mock_server.uri(), "pets/7/", "get", None, None, None)
        .await;

    assert!(text.contains("# Endpoint Analysis: GET /pets/{petId}"));
    assert!(text.contains("- **petId** (string, **Required**)"));
    assert!(text.ends_with("# API Response\n\nStatus Code: 503\n\nResponse Body:\ndown for maintenance"));
}

#[tokio::test]
async fn test_unknown_path_still_makes_the_call() {
    let mock_server = MockServer::start().await;
    serve_spec(&mock_server, search_spec()).await;

    Mock::given(method("GET"))
        .and(path("/owners"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let text = analyzer()
        .analyze_and_call(&mock_server.uri(), "/owners", "GET", None, None, None)
        .await;

    assert!(text.starts_with(
        "# Endpoint Analysis\n\nError: Path '/owners' not found in the OpenAPI specification."
    ));
    assert!(text.ends_with("# API Response\n\nStatus Code: 204\n\nResponse Body: <empty>"));
}

#[tokio::test]
async fn test_raw_paths_are_still_called() {
    let mock_server = MockServer::start().await;
    serve_spec(&mock_server, search_spec()).await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .and(query_param("status", "sold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/pets/hello"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such pet"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let analyzer = analyzer();

    let text = analyzer
        .analyze_and_call(&mock_server.uri(), "/pets?status=sold", "GET", None, None, None)
        .await;
    assert!(text.starts_with(
        "# Endpoint Analysis\n\nError: Path '/pets?status=sold' not found in the OpenAPI specification."
    ));
    assert!(text.contains("# API Response\n\nStatus Code: 200"));

    let text = analyzer
        .analyze_and_call(&mock_server.uri(), "/pets/hello world", "GET", None, None, None)
        .await;
    assert!(text.contains("# Endpoint Analysis: GET /pets/{petId}"));
    assert!(text.ends_with("# API Response\n\nStatus Code: 404\n\nResponse Body:\nno such pet"));
}

#[tokio::test]
async fn test_swagger_body_parameter_and_post_call() {
    let mock_server = MockServer::start().await;
    serve_spec(
        &mock_server,
        json!({
            "swagger": "2.0",
            "consumes": ["application/json"],
            "paths": {
                "/pet": {
                    "post": {
                        "operationId": "addPet",
                        "parameters": [
                            {"name": "api_key", "in": "header", "type": "string", "example": "special-key"},
                            {"in": "body", "name": "body", "required": true, "schema": {"$ref": "#/definitions/Pet"}}
                        ]
                    }
                }
            },
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string", "example": "doggie"},
                        "status": {"type": "string", "enum": ["available", "pending", "sold"]}
                    }
                }
            }
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(header("api_key", "special-key"))
        .and(body_json(json!({"name": "doggie"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 10, "name": "doggie"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let text = analyzer()
        .analyze_and_call(
            &mock_server.uri(),
            "/pet",
            "POST",
            None,
            Some(r#"{"name": "doggie"}"#),
            Some(r#"{"api_key": "special-key"}"#),
        )
        .await;

    assert!(text.contains("Operation ID: `addPet`"));
    assert!(text.contains("### Header Parameters\n\n- **api_key** (string, Optional)\n  - Example: `special-key`\n"));
    assert!(text.contains("## Request Body\n\nRequired: Yes\n\n### Content Type: application/json\n\nSchema: Pet\n\n"));
    assert!(text.contains("- **status** (string, Required: No)\n  - Enum values: available, pending, sold\n"));
    assert!(text.contains("\"api_key\": \"special-key\""));
    assert!(text.contains("# API Response\n\nStatus Code: 200"));
}

#[tokio::test]
async fn test_cyclic_body_schema_is_reported() {
    let mock_server = MockServer::start().await;
    serve_spec(
        &mock_server,
        json!({
            "openapi": "3.0.0",
            "paths": {
                "/loop": {"post": {"requestBody": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/A"}
                }}}}}
            },
            "components": {"schemas": {
                "A": {"$ref": "#/components/schemas/B"},
                "B": {"$ref": "#/components/schemas/A"}
            }}
        }),
    )
    .await;

    let text = analyzer()
        .analyze_endpoint(&mock_server.uri(), "/loop", "POST")
        .await;
    assert!(text.starts_with("Error: Cyclic reference detected:"), "{}", text);
}
