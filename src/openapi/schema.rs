//! Typed view over a JSON schema node

use crate::openapi::resolver::{ref_pointer, short_name};
use crate::utils::display_value;
use serde_json::{Map, Value};

/// A schema classified by shape. Borrowed from the document, never owned.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    Reference(&'a str),
    Object(ObjectSchema<'a>),
    Array(ArraySchema<'a>),
    Primitive(PrimitiveSchema<'a>),
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectSchema<'a> {
    pub raw: &'a Value,
    pub properties: Option<&'a Map<String, Value>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArraySchema<'a> {
    pub raw: &'a Value,
    pub items: Option<&'a Value>,
}

#[derive(Debug, Clone, Copy)]
pub struct PrimitiveSchema<'a> {
    pub raw: &'a Value,
    pub type_name: &'a str,
    pub format: Option<&'a str>,
}

impl<'a> SchemaNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        if !value.is_object() {
            return SchemaNode::Unknown;
        }
        if let Some(pointer) = ref_pointer(value) {
            return SchemaNode::Reference(pointer);
        }

        let properties = value.get("properties").and_then(Value::as_object);
        let items = value.get("items");

        match declared_type(value) {
            Some("object") => SchemaNode::Object(ObjectSchema { raw: value, properties }),
            Some("array") => SchemaNode::Array(ArraySchema { raw: value, items }),
            Some(type_name) => SchemaNode::Primitive(PrimitiveSchema {
                raw: value,
                type_name,
                format: value.get("format").and_then(Value::as_str),
            }),
            None if properties.is_some() => {
                SchemaNode::Object(ObjectSchema { raw: value, properties })
            }
            None if items.is_some() => SchemaNode::Array(ArraySchema { raw: value, items }),
            None => SchemaNode::Unknown,
        }
    }

    /// Type string shown next to parameters and properties
    pub fn type_label(&self) -> String {
        match self {
            SchemaNode::Reference(pointer) => short_name(pointer).to_string(),
            SchemaNode::Object(_) => "object".to_string(),
            SchemaNode::Array(array) => match array.items {
                Some(items) => format!("array of {}", SchemaNode::classify(items).type_label()),
                None => "array".to_string(),
            },
            SchemaNode::Primitive(primitive) => primitive.label(),
            SchemaNode::Unknown => "unknown".to_string(),
        }
    }

    pub fn raw(&self) -> Option<&'a Value> {
        match self {
            SchemaNode::Object(object) => Some(object.raw),
            SchemaNode::Array(array) => Some(array.raw),
            SchemaNode::Primitive(primitive) => Some(primitive.raw),
            SchemaNode::Reference(_) | SchemaNode::Unknown => None,
        }
    }

    /// Explicit `example` declared on the node
    pub fn example(&self) -> Option<&'a Value> {
        self.raw().and_then(|raw| raw.get("example"))
    }

    pub fn description(&self) -> Option<&'a str> {
        self.raw()
            .and_then(|raw| raw.get("description"))
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }

    pub fn enum_values(&self) -> Option<&'a Vec<Value>> {
        self.raw()
            .and_then(|raw| raw.get("enum"))
            .and_then(Value::as_array)
            .filter(|values| !values.is_empty())
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, SchemaNode::Reference(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SchemaNode::Object(_))
    }
}

impl<'a> ObjectSchema<'a> {
    /// A property is required iff the `required` array lists its name
    pub fn is_required(&self, property: &str) -> bool {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().any(|n| n.as_str() == Some(property)))
            .unwrap_or(false)
    }
}

impl<'a> PrimitiveSchema<'a> {
    pub fn label(&self) -> String {
        match self.format {
            Some(format) => format!("{} ({})", self.type_name, format),
            None => self.type_name.to_string(),
        }
    }
}

/// `type` as a string, or the first non-null entry of an OpenAPI 3.1 type array
fn declared_type(value: &Value) -> Option<&str> {
    match value.get("type")? {
        Value::String(t) => Some(t.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

/// Enum values joined for display
pub fn join_enum(values: &[Value]) -> String {
    values
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_labels() {
        let cases = vec![
            (json!({"type": "string"}), "string"),
            (json!({"type": "integer", "format": "int64"}), "integer (int64)"),
            (json!({"type": "array", "items": {"type": "string"}}), "array of string"),
            (
                json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}),
                "array of Pet",
            ),
            (json!({"type": "object", "properties": {}}), "object"),
            (json!({"properties": {"a": {}}}), "object"),
            (json!({"type": ["null", "number"]}), "number"),
            (json!({"$ref": "#/definitions/Tag"}), "Tag"),
            (json!({"description": "anything"}), "unknown"),
            (json!(true), "unknown"),
        ];

        for (schema, expected) in cases {
            assert_eq!(SchemaNode::classify(&schema).type_label(), expected, "{}", schema);
        }
    }

    #[test]
    fn test_required_membership() {
        let schema = json!({
            "type": "object",
            "required": ["name", 7],
            "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}
        });
        match SchemaNode::classify(&schema) {
            SchemaNode::Object(object) => {
                assert!(object.is_required("name"));
                assert!(!object.is_required("age"));
            }
            other => panic!("expected object, got {:?}", other),
        }

        let no_required = json!({"type": "object", "properties": {"name": {}}});
        match SchemaNode::classify(&no_required) {
            SchemaNode::Object(object) => assert!(!object.is_required("name")),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_and_description() {
        let schema = json!({"type": "string", "enum": ["a", 2], "description": "status"});
        let node = SchemaNode::classify(&schema);
        assert_eq!(join_enum(node.enum_values().unwrap()), "a, 2");
        assert_eq!(node.description(), Some("status"));
        assert!(node.example().is_none());
    }
}
