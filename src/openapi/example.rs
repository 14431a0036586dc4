//! Example value synthesis for schemas without explicit examples

use crate::error::Result;
use crate::openapi::resolver::{resolve_chain, RefResolver, ResolutionTrail};
use crate::openapi::schema::{PrimitiveSchema, SchemaNode};
use serde_json::{json, Map, Value};
use tracing::debug;

const DATE_TIME_EXAMPLE: &str = "2023-01-01T12:00:00Z";
const DATE_EXAMPLE: &str = "2023-01-01";
const UUID_EXAMPLE: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Placeholder used whenever synthesis cannot proceed
pub fn fallback_example() -> Value {
    json!({"example": "value"})
}

fn array_example() -> Value {
    json!(["item1", "item2"])
}

/// Produces representative values; never fails
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    resolver: RefResolver<'a>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(resolver: RefResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Explicit example if declared, otherwise a generated one
    pub fn synthesize(&self, schema: &'a Value) -> Value {
        let mut trail = ResolutionTrail::new();
        match self.generate(schema, &mut trail) {
            Ok(value) => value,
            Err(e) => {
                debug!("Failed to generate example: {}", e);
                fallback_example()
            }
        }
    }

    fn generate(&self, schema: &'a Value, trail: &mut ResolutionTrail) -> Result<Value> {
        let node = SchemaNode::classify(schema);
        if let Some(example) = node.example() {
            return Ok(example.clone());
        }

        match node {
            SchemaNode::Reference(pointer) => {
                trail.enter(pointer)?;
                let target = self.resolver.resolve(pointer);
                let generated = match target {
                    Ok(target) => self.generate(target, trail),
                    Err(e) => Err(e),
                };
                trail.leave(pointer);
                generated
            }
            SchemaNode::Primitive(primitive) => {
                Ok(primitive_example(&primitive, None).unwrap_or_else(fallback_example))
            }
            SchemaNode::Array(_) => Ok(array_example()),
            SchemaNode::Object(object) => match object.properties {
                Some(properties) => self.object_example(properties),
                None => Ok(json!({"property": "value"})),
            },
            SchemaNode::Unknown => Ok(fallback_example()),
        }
    }

    /// One level of generation; nested object schemas are never expanded
    fn object_example(&self, properties: &'a Map<String, Value>) -> Result<Value> {
        let mut example = Map::new();

        for (name, property) in properties {
            if let Some(explicit) = property.get("example") {
                example.insert(name.clone(), explicit.clone());
                continue;
            }

            // References are followed only to learn the property's kind
            let target = resolve_chain(&self.resolver, property)?;
            let value = match SchemaNode::classify(target) {
                SchemaNode::Primitive(primitive) => primitive_example(&primitive, Some(name.as_str())),
                SchemaNode::Array(_) => Some(array_example()),
                SchemaNode::Object(_) => Some(json!({"nestedProperty": "value"})),
                SchemaNode::Reference(_) | SchemaNode::Unknown => None,
            };

            if let Some(value) = value {
                example.insert(name.clone(), value);
            }
        }

        Ok(Value::Object(example))
    }
}

/// Literal for a primitive; string placeholders are prefixed with the property name when given
fn primitive_example(primitive: &PrimitiveSchema<'_>, property: Option<&str>) -> Option<Value> {
    if let Some(first) = primitive
        .raw
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
    {
        return Some(first.clone());
    }

    match primitive.type_name {
        "integer" | "number" => Some(json!(42)),
        "boolean" => Some(json!(true)),
        "string" => Some(match primitive.format {
            Some("date-time") => json!(DATE_TIME_EXAMPLE),
            Some("date") => json!(DATE_EXAMPLE),
            Some("uuid") => json!(UUID_EXAMPLE),
            _ => match property {
                Some(name) => json!(format!("example_{}", name)),
                None => json!("example"),
            },
        }),
        _ => None,
    }
}
