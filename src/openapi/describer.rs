//! Text breakdown of an operation: overview, parameters, request body and a call template

use crate::error::Result;
use crate::openapi::document::SpecDocument;
use crate::openapi::example::ExampleSynthesizer;
use crate::openapi::operation::{
    MediaTypeDescriptor, OperationDescriptor, ParameterDescriptor, ParameterLocation,
    RequestBodyDescriptor,
};
use crate::openapi::resolver::{resolve_chain, short_name, RefResolver, ResolutionTrail};
use crate::openapi::schema::{join_enum, SchemaNode};
use crate::utils::{display_value, JsonCodec};
use serde_json::{json, Map, Value};

const INDENT: &str = "  ";

/// Concrete request the caller is about to make; used in the call template
#[derive(Debug, Clone, Copy)]
pub struct CallTarget<'s> {
    pub domain: &'s str,
    pub path: &'s str,
}

pub struct EndpointDescriber<'a> {
    resolver: RefResolver<'a>,
    synthesizer: ExampleSynthesizer<'a>,
    codec: JsonCodec,
}

impl<'a> EndpointDescriber<'a> {
    pub fn new(document: &'a SpecDocument, codec: JsonCodec) -> Self {
        let resolver = document.resolver();
        Self {
            resolver,
            synthesizer: ExampleSynthesizer::new(resolver),
            codec,
        }
    }

    /// Render the full analysis. Unresolvable or cyclic references abort it.
    pub fn describe(&self, operation: &OperationDescriptor<'a>, target: CallTarget<'_>) -> Result<String> {
        let mut out = format!(
            "# Endpoint Analysis: {} {}\n\n",
            operation.method, operation.template
        );
        let mut trail = ResolutionTrail::new();

        self.write_overview(operation, &mut out);
        self.write_parameters(operation, &mut out);
        if let Some(ref body) = operation.request_body {
            self.write_request_body(body, &mut trail, &mut out)?;
        }
        self.write_call_template(operation, target, &mut out);

        Ok(out)
    }

    fn write_overview(&self, operation: &OperationDescriptor<'a>, out: &mut String) {
        if !operation.has_overview() {
            return;
        }

        out.push_str("## Overview\n\n");
        if let Some(summary) = operation.summary {
            out.push_str(&format!("{}\n\n", summary));
        }
        if let Some(description) = operation.description {
            out.push_str(&format!("{}\n\n", description));
        }
        if operation.deprecated {
            out.push_str("**Deprecated:** this operation is marked as deprecated.\n\n");
        }
        if let Some(operation_id) = operation.operation_id {
            out.push_str(&format!("Operation ID: `{}`\n\n", operation_id));
        }
        if !operation.tags.is_empty() {
            out.push_str(&format!("Tags: {}\n\n", operation.tags.join(", ")));
        }
    }

    fn write_parameters(&self, operation: &OperationDescriptor<'a>, out: &mut String) {
        if operation.parameters.is_empty() {
            return;
        }

        out.push_str("## Parameters\n\n");
        for location in ParameterLocation::ORDER {
            let group = operation.parameters_in(location);
            if group.is_empty() {
                continue;
            }

            out.push_str(&format!("### {}\n\n", location.heading()));
            for param in group {
                self.write_parameter(param, out);
            }
            out.push('\n');
        }
    }

    fn write_parameter(&self, param: &ParameterDescriptor<'a>, out: &mut String) {
        let type_label = param
            .schema
            .map(|schema| SchemaNode::classify(schema).type_label())
            .unwrap_or_else(|| "unknown".to_string());
        let required = if param.required {
            ", **Required**"
        } else {
            ", Optional"
        };

        out.push_str(&format!("- **{}** ({}{})\n", param.name, type_label, required));

        if let Some(description) = param.description {
            out.push_str(&format!("  - {}\n", description));
        }

        let enum_values = param
            .schema
            .and_then(|schema| resolve_chain(&self.resolver, schema).ok())
            .and_then(|schema| SchemaNode::classify(schema).enum_values());
        if let Some(values) = enum_values {
            out.push_str(&format!("  - Enum values: {}\n", join_enum(values)));
        }

        if let Some(example) = self.parameter_example(param) {
            out.push_str(&format!("  - Example: `{}`\n", display_value(&example)));
        }
    }

    /// Parameter example, then schema example, then a synthesized one
    pub fn parameter_example(&self, param: &ParameterDescriptor<'a>) -> Option<Value> {
        if let Some(example) = param.example {
            return Some(example.clone());
        }
        let schema = param.schema?;
        match SchemaNode::classify(schema) {
            SchemaNode::Unknown => None,
            _ => Some(self.synthesizer.synthesize(schema)),
        }
    }

    fn write_request_body(
        &self,
        body: &RequestBodyDescriptor<'a>,
        trail: &mut ResolutionTrail,
        out: &mut String,
    ) -> Result<()> {
        out.push_str("## Request Body\n\n");
        out.push_str(&format!(
            "Required: {}\n\n",
            if body.required { "Yes" } else { "No" }
        ));
        if let Some(description) = body.description {
            out.push_str(&format!("{}\n\n", description));
        }

        for media in &body.content {
            out.push_str(&format!("### Content Type: {}\n\n", media.content_type));

            if let Some(schema) = media.schema {
                self.describe_schema(schema, 0, trail, out)?;
            }

            if let Some(example) = media.example {
                out.push_str("#### Example:\n\n");
                self.write_json_block(example, out);
            } else if let Some(schema) = media.schema {
                out.push_str("#### Example (Generated):\n\n");
                self.write_json_block(&self.synthesizer.synthesize(schema), out);
            }
        }

        Ok(())
    }

    fn write_json_block(&self, value: &Value, out: &mut String) {
        out.push_str(&format!("```json\n{}\n```\n\n", self.codec.render(value)));
    }

    /// Recursive schema breakdown, two spaces of indentation per level
    pub fn describe_schema(
        &self,
        schema: &'a Value,
        level: usize,
        trail: &mut ResolutionTrail,
        out: &mut String,
    ) -> Result<()> {
        let indent = INDENT.repeat(level);

        match SchemaNode::classify(schema) {
            SchemaNode::Reference(pointer) => {
                out.push_str(&format!("{}Schema: {}\n\n", indent, short_name(pointer)));
                trail.enter(pointer)?;
                let target = self.resolver.resolve(pointer)?;
                self.describe_schema(target, level, trail, out)?;
                trail.leave(pointer);
            }
            SchemaNode::Object(object) => {
                out.push_str(&format!("{}Type: object", indent));
                let properties = match object.properties {
                    Some(properties) => properties,
                    None => {
                        out.push_str(" (no properties defined)\n\n");
                        return Ok(());
                    }
                };

                out.push_str(&format!("\n\n{}Properties:\n\n", indent));
                for (name, property) in properties {
                    let node = SchemaNode::classify(property);
                    out.push_str(&format!(
                        "{}- **{}** ({}, Required: {})\n",
                        indent,
                        name,
                        node.type_label(),
                        if object.is_required(name) { "Yes" } else { "No" }
                    ));
                    if let Some(description) = node.description() {
                        out.push_str(&format!("{}  - Description: {}\n", indent, description));
                    }
                    if let Some(values) = node.enum_values() {
                        out.push_str(&format!("{}  - Enum values: {}\n", indent, join_enum(values)));
                    }

                    match node {
                        SchemaNode::Object(nested) if nested.properties.is_some() => {
                            out.push('\n');
                            self.describe_schema(property, level + 1, trail, out)?;
                        }
                        SchemaNode::Array(array) => {
                            if let Some(items) = array.items {
                                let items_node = SchemaNode::classify(items);
                                if items_node.is_reference() || items_node.is_object() {
                                    out.push_str(&format!("\n{}  - Items:\n\n", indent));
                                    self.describe_schema(items, level + 2, trail, out)?;
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            SchemaNode::Array(array) => {
                out.push_str(&format!("{}Type: array\n\n", indent));
                if let Some(items) = array.items {
                    out.push_str(&format!("{}Items:\n\n", indent));
                    self.describe_schema(items, level + 1, trail, out)?;
                }
            }
            SchemaNode::Primitive(primitive) => {
                out.push_str(&format!("{}Type: {}\n\n", indent, primitive.label()));
                if let Some(values) = SchemaNode::Primitive(primitive).enum_values() {
                    out.push_str(&format!("{}Enum values: {}\n\n", indent, join_enum(values)));
                }
            }
            SchemaNode::Unknown => {
                out.push_str(&format!("{}Schema: unknown\n\n", indent));
            }
        }

        Ok(())
    }

    fn write_call_template(
        &self,
        operation: &OperationDescriptor<'a>,
        target: CallTarget<'_>,
        out: &mut String,
    ) {
        out.push_str("## How to Call This Endpoint\n\n");
        out.push_str("You can use the `analyzeAndCall` function to make a request to this endpoint:\n\n");
        out.push_str("```\nanalyzeAndCall(\n");
        for argument in [target.domain, target.path, operation.method.as_str()] {
            out.push_str(&format!("{}{},\n", INDENT, Value::from(argument)));
        }

        let query = operation.parameters_in(ParameterLocation::Query);
        if query.is_empty() {
            out.push_str("  null, // No query parameters needed\n");
        } else {
            let mut values = Map::new();
            for param in query {
                let example = self
                    .parameter_example(param)
                    .map(|v| display_value(&v))
                    .unwrap_or_else(|| "value".to_string());
                values.insert(param.name.to_string(), Value::String(example));
            }
            out.push_str("  // Example query parameters\n");
            out.push_str(&format!("{},\n", self.indented_json(&Value::Object(values))));
        }

        match operation
            .request_body
            .as_ref()
            .and_then(|body| body.content.first())
            .and_then(|media| self.media_example(media))
        {
            Some(body) => {
                out.push_str("  // Example request body\n");
                out.push_str(&format!("{},\n", self.indented_json(&body)));
            }
            None => out.push_str("  null, // No request body needed\n"),
        }

        let content_type = operation
            .request_body
            .as_ref()
            .and_then(|body| body.content.first())
            .map(|media| media.content_type)
            .unwrap_or("application/json");
        let mut headers = Map::new();
        headers.insert("Content-Type".to_string(), json!(content_type));
        for param in operation.parameters_in(ParameterLocation::Header) {
            if let Some(example) = self.parameter_example(param) {
                headers.insert(param.name.to_string(), Value::String(display_value(&example)));
            }
        }
        out.push_str("  // Example headers\n");
        out.push_str(&format!("{}\n", self.indented_json(&Value::Object(headers))));
        out.push_str(")\n```\n");
    }

    fn media_example(&self, media: &MediaTypeDescriptor<'a>) -> Option<Value> {
        match (media.example, media.schema) {
            (Some(example), _) => Some(example.clone()),
            (None, Some(schema)) => Some(self.synthesizer.synthesize(schema)),
            (None, None) => None,
        }
    }

    fn indented_json(&self, value: &Value) -> String {
        self.codec
            .render(value)
            .lines()
            .map(|line| format!("{}{}", INDENT, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
