//! Operation extraction from a path item

use crate::error::{Result, ScoutError};
use crate::http::HttpMethod;
use crate::openapi::document::{string_list, SpecDocument};
use crate::openapi::resolver::{ref_pointer, RefResolver};
use serde_json::{Map, Value};
use std::fmt;

/// Where a parameter travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Rendering order in the analysis
    pub const ORDER: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "Path Parameters",
            ParameterLocation::Query => "Query Parameters",
            ParameterLocation::Header => "Header Parameters",
            ParameterLocation::Cookie => "Cookie Parameters",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ParameterDescriptor<'a> {
    pub name: &'a str,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<&'a str>,
    /// `schema` (OpenAPI 3) or the parameter itself when it carries an inline `type` (Swagger 2.0)
    pub schema: Option<&'a Value>,
    pub example: Option<&'a Value>,
}

#[derive(Debug, Clone)]
pub struct MediaTypeDescriptor<'a> {
    pub content_type: &'a str,
    pub schema: Option<&'a Value>,
    pub example: Option<&'a Value>,
}

#[derive(Debug, Clone)]
pub struct RequestBodyDescriptor<'a> {
    pub required: bool,
    pub description: Option<&'a str>,
    pub content: Vec<MediaTypeDescriptor<'a>>,
}

/// One method of one path template, extracted once per analysis
#[derive(Debug, Clone)]
pub struct OperationDescriptor<'a> {
    pub method: HttpMethod,
    pub template: &'a str,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub operation_id: Option<&'a str>,
    pub tags: Vec<&'a str>,
    pub deprecated: bool,
    pub parameters: Vec<ParameterDescriptor<'a>>,
    pub request_body: Option<RequestBodyDescriptor<'a>>,
}

const DEFAULT_CONTENT_TYPE: &str = "application/json";

fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Follow a `$ref` on a parameter or request body object
fn dereference<'a>(resolver: &RefResolver<'a>, value: &'a Value) -> Result<&'a Value> {
    match ref_pointer(value) {
        Some(pointer) => resolver.resolve(pointer),
        None => Ok(value),
    }
}

impl<'a> OperationDescriptor<'a> {
    /// Extract `method` of `template` from the document
    pub fn extract(document: &'a SpecDocument, template: &'a str, method: HttpMethod) -> Result<Self> {
        let not_supported = || ScoutError::method_not_supported(method.as_str(), template);

        let path_item = document
            .paths()
            .and_then(|paths| paths.get(template))
            .ok_or_else(|| ScoutError::path_not_found(template))?;
        let operation = path_item
            .get(method.spec_key())
            .filter(|op| op.is_object())
            .ok_or_else(not_supported)?;

        let resolver = document.resolver();
        let mut raw_parameters = Vec::new();
        for source in [path_item.get("parameters"), operation.get("parameters")] {
            if let Some(list) = source.and_then(Value::as_array) {
                for entry in list {
                    raw_parameters.push(dereference(&resolver, entry)?);
                }
            }
        }

        let mut parameters: Vec<ParameterDescriptor<'a>> = Vec::new();
        let mut body_parameter = None;
        for raw in merge_parameters(raw_parameters) {
            match text(raw, "in") {
                Some("body") => body_parameter = Some(raw),
                Some(location) => {
                    if let Some(location) = ParameterLocation::parse(location) {
                        parameters.push(parameter_descriptor(raw, location));
                    }
                }
                None => {}
            }
        }

        let request_body = match operation.get("requestBody") {
            Some(body) => Some(request_body_descriptor(dereference(&resolver, body)?)),
            None => body_parameter.map(|param| {
                swagger_body_descriptor(document, operation, param)
            }),
        };

        Ok(Self {
            method,
            template,
            summary: text(operation, "summary"),
            description: text(operation, "description"),
            operation_id: text(operation, "operationId"),
            tags: string_list(operation.get("tags")),
            deprecated: flag(operation, "deprecated"),
            parameters,
            request_body,
        })
    }

    /// Parameters at one location, in declared order
    pub fn parameters_in(&self, location: ParameterLocation) -> Vec<&ParameterDescriptor<'a>> {
        self.parameters
            .iter()
            .filter(|p| p.location == location)
            .collect()
    }

    pub fn has_overview(&self) -> bool {
        self.summary.is_some()
            || self.description.is_some()
            || self.operation_id.is_some()
            || !self.tags.is_empty()
            || self.deprecated
    }
}

/// Operation-level entries replace path-level ones with the same name and location
fn merge_parameters(raw: Vec<&Value>) -> Vec<&Value> {
    let mut merged: Vec<&Value> = Vec::with_capacity(raw.len());
    for param in raw {
        let key = (param.get("name"), param.get("in"));
        match merged
            .iter()
            .position(|existing| (existing.get("name"), existing.get("in")) == key)
        {
            Some(index) => merged[index] = param,
            None => merged.push(param),
        }
    }
    merged
}

fn parameter_descriptor(raw: &Value, location: ParameterLocation) -> ParameterDescriptor<'_> {
    let schema = raw
        .get("schema")
        .or_else(|| raw.get("type").map(|_| raw));

    ParameterDescriptor {
        name: text(raw, "name").unwrap_or("unknown"),
        location,
        required: flag(raw, "required"),
        description: text(raw, "description"),
        schema,
        example: raw
            .get("example")
            .or_else(|| first_named_example(raw.get("examples"))),
    }
}

fn request_body_descriptor(raw: &Value) -> RequestBodyDescriptor<'_> {
    let content = raw
        .get("content")
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media)| MediaTypeDescriptor {
                    content_type: content_type.as_str(),
                    schema: media.get("schema"),
                    example: media
                        .get("example")
                        .or_else(|| first_named_example(media.get("examples"))),
                })
                .collect()
        })
        .unwrap_or_default();

    RequestBodyDescriptor {
        required: flag(raw, "required"),
        description: text(raw, "description"),
        content,
    }
}

/// Swagger 2.0 `in: body` parameter presented as a request body
fn swagger_body_descriptor<'a>(
    document: &'a SpecDocument,
    operation: &'a Value,
    param: &'a Value,
) -> RequestBodyDescriptor<'a> {
    let mut content_types = string_list(operation.get("consumes"));
    if content_types.is_empty() {
        content_types = document.consumes();
    }
    if content_types.is_empty() {
        content_types.push(DEFAULT_CONTENT_TYPE);
    }

    RequestBodyDescriptor {
        required: flag(param, "required"),
        description: text(param, "description"),
        content: content_types
            .into_iter()
            .map(|content_type| MediaTypeDescriptor {
                content_type,
                schema: param.get("schema"),
                example: None,
            })
            .collect(),
    }
}

/// `value` of the first entry in an OpenAPI 3 `examples` map
fn first_named_example(examples: Option<&Value>) -> Option<&Value> {
    examples
        .and_then(Value::as_object)
        .and_then(|map: &Map<String, Value>| map.values().next())
        .and_then(|example| example.get("value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(root: Value) -> SpecDocument {
        SpecDocument::new("https://a.io/openapi.json", root)
    }

    #[test]
    fn test_extracts_openapi3_operation() {
        let doc = document(json!({
            "paths": {"/pets/{petId}": {
                "parameters": [
                    {"name": "petId", "in": "path", "required": true, "schema": {"type": "integer"}},
                    {"name": "trace", "in": "header", "schema": {"type": "string"}}
                ],
                "put": {
                    "summary": "Update a pet",
                    "operationId": "updatePet",
                    "tags": ["pets"],
                    "parameters": [
                        {"$ref": "#/components/parameters/Trace"},
                        {"name": "dryRun", "in": "query", "schema": {"type": "boolean"}}
                    ],
                    "requestBody": {"$ref": "#/components/requestBodies/Pet"}
                }
            }},
            "components": {
                "parameters": {
                    "Trace": {"name": "trace", "in": "header", "required": true, "schema": {"type": "string"}}
                },
                "requestBodies": {
                    "Pet": {
                        "required": true,
                        "content": {
                            "application/json": {"schema": {"type": "object"}, "examples": {"a": {"value": {"name": "Rex"}}}},
                            "application/xml": {"schema": {"type": "object"}}
                        }
                    }
                }
            }
        }));

        let op = OperationDescriptor::extract(&doc, "/pets/{petId}", HttpMethod::Put).unwrap();
        assert_eq!(op.summary, Some("Update a pet"));
        assert_eq!(op.operation_id, Some("updatePet"));
        assert_eq!(op.tags, vec!["pets"]);

        let names: Vec<&str> = op.parameters.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["petId", "trace", "dryRun"]);
        assert!(op.parameters_in(ParameterLocation::Header)[0].required);

        let body = op.request_body.unwrap();
        assert!(body.required);
        assert_eq!(body.content.len(), 2);
        assert_eq!(body.content[0].example, Some(&json!({"name": "Rex"})));
        assert_eq!(body.content[1].content_type, "application/xml");
    }

    #[test]
    fn test_method_not_supported() {
        let doc = document(json!({"paths": {"/pets": {"get": {}}}}));
        let err = OperationDescriptor::extract(&doc, "/pets", HttpMethod::Delete).unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP method 'DELETE' not supported for path '/pets'."
        );
    }

    #[test]
    fn test_swagger2_body_and_inline_types() {
        let doc = document(json!({
            "swagger": "2.0",
            "consumes": ["application/json"],
            "paths": {"/pets": {"post": {
                "parameters": [
                    {"name": "body", "in": "body", "required": true, "schema": {"$ref": "#/definitions/Pet"}},
                    {"name": "limit", "in": "query", "type": "integer", "format": "int32"},
                    {"name": "upload", "in": "formData", "type": "file"}
                ]
            }}},
            "definitions": {"Pet": {"type": "object"}}
        }));

        let op = OperationDescriptor::extract(&doc, "/pets", HttpMethod::Post).unwrap();
        assert_eq!(op.parameters.len(), 1);
        let limit = &op.parameters[0];
        assert_eq!(limit.location, ParameterLocation::Query);
        assert_eq!(limit.schema.unwrap()["format"], "int32");

        let body = op.request_body.unwrap();
        assert!(body.required);
        assert_eq!(body.content[0].content_type, "application/json");
        assert_eq!(
            body.content[0].schema,
            Some(&json!({"$ref": "#/definitions/Pet"}))
        );
    }

    #[test]
    fn test_broken_parameter_reference_fails() {
        let doc = document(json!({"paths": {"/x": {"get": {
            "parameters": [{"$ref": "#/components/parameters/Nope"}]
        }}}}));
        let err = OperationDescriptor::extract(&doc, "/x", HttpMethod::Get).unwrap_err();
        assert_eq!(err.category(), "reference");
    }
}
