//! # Schema Mapping
//!
//! JSON Schema allows `true`/`false` wherever a schema is expected; both are
//! normalized here (`true` to the empty schema, `false` to `{not: {}}`).

use super::{shape_error, FromNode, MapResult, ObjectReader};
use crate::oas::models::{
    BoolOrSchema, Discriminator, EntityKind, ExclusiveBound, RefOr, Schema, SchemaType, Xml,
};
use crate::oas::node::{describe, Node, NodePath};

impl FromNode for Schema {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        match node {
            Node::Bool(true) => return Ok(Schema::default()),
            Node::Bool(false) => return Ok(Schema::never()),
            _ => {}
        }
        let mut obj = ObjectReader::new(node, path, EntityKind::Schema)?;
        Ok(Schema {
            title: obj.optional("title")?,
            description: obj.optional("description")?,
            default: obj.optional("default")?,
            deprecated: obj.optional("deprecated")?,
            read_only: obj.optional("readOnly")?,
            write_only: obj.optional("writeOnly")?,
            examples: obj.collection("examples")?,
            example: obj.optional("example")?,
            nullable: obj.optional("nullable")?,
            schema_type: obj.optional("type")?,
            format: obj.optional("format")?,
            max_length: obj.optional("maxLength")?,
            min_length: obj.optional("minLength")?,
            pattern: obj.optional("pattern")?,
            content_media_type: obj.optional("contentMediaType")?,
            content_encoding: obj.optional("contentEncoding")?,
            content_schema: obj.optional("contentSchema")?,
            multiple_of: obj.optional("multipleOf")?,
            maximum: obj.optional("maximum")?,
            exclusive_maximum: obj.optional("exclusiveMaximum")?,
            minimum: obj.optional("minimum")?,
            exclusive_minimum: obj.optional("exclusiveMinimum")?,
            items: obj.optional("items")?,
            prefix_items: obj.collection("prefixItems")?,
            contains: obj.optional("contains")?,
            max_items: obj.optional("maxItems")?,
            min_items: obj.optional("minItems")?,
            unique_items: obj.optional("uniqueItems")?,
            max_contains: obj.optional("maxContains")?,
            min_contains: obj.optional("minContains")?,
            unevaluated_items: obj.optional("unevaluatedItems")?,
            properties: obj.collection("properties")?,
            pattern_properties: obj.collection("patternProperties")?,
            additional_properties: obj.optional("additionalProperties")?,
            max_properties: obj.optional("maxProperties")?,
            min_properties: obj.optional("minProperties")?,
            required: obj.collection("required")?,
            dependent_required: obj.collection("dependentRequired")?,
            dependent_schemas: obj.collection("dependentSchemas")?,
            property_names: obj.optional("propertyNames")?,
            unevaluated_properties: obj.optional("unevaluatedProperties")?,
            all_of: obj.collection("allOf")?,
            any_of: obj.collection("anyOf")?,
            one_of: obj.collection("oneOf")?,
            not: obj.optional("not")?,
            if_schema: obj.optional("if")?,
            then_schema: obj.optional("then")?,
            else_schema: obj.optional("else")?,
            enum_values: obj.optional("enum")?,
            const_value: obj.optional("const")?,
            discriminator: obj.optional("discriminator")?,
            xml: obj.optional("xml")?,
            external_docs: obj.optional("externalDocs")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for SchemaType {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        match node {
            Node::String(name) => Ok(SchemaType::Single(name.clone())),
            Node::Array(_) => Vec::<String>::from_node(node, path).map(SchemaType::Multiple),
            other => Err(shape_error(path, "string or array of strings", describe(other))),
        }
    }
}

impl FromNode for BoolOrSchema {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        match node {
            Node::Bool(flag) => Ok(BoolOrSchema::Bool(*flag)),
            _ => RefOr::<Schema>::from_node(node, path).map(|s| BoolOrSchema::Schema(Box::new(s))),
        }
    }
}

impl FromNode for ExclusiveBound {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        match node {
            Node::Bool(flag) => Ok(ExclusiveBound::Flag(*flag)),
            Node::Number(n) => n
                .as_f64()
                .map(ExclusiveBound::Limit)
                .ok_or_else(|| shape_error(path, "boolean or number", describe(node))),
            other => Err(shape_error(path, "boolean or number", describe(other))),
        }
    }
}

impl FromNode for Discriminator {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Discriminator)?;
        Ok(Discriminator {
            property_name: obj.required("propertyName")?,
            mapping: obj.collection("mapping")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Xml {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Xml)?;
        Ok(Xml {
            name: obj.optional("name")?,
            namespace: obj.optional("namespace")?,
            prefix: obj.optional("prefix")?,
            attribute: obj.optional("attribute")?,
            wrapped: obj.optional("wrapped")?,
            extensions: obj.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(node: Node) -> Schema {
        Schema::from_node(&node, &NodePath::root()).unwrap()
    }

    #[test]
    fn test_boolean_schemas() {
        assert_eq!(schema(json!(true)), Schema::default());
        assert_eq!(schema(json!(false)), Schema::never());
    }

    #[test]
    fn test_type_single_and_list() {
        let single = schema(json!({"type": "string"}));
        assert!(single.schema_type.as_ref().unwrap().includes("string"));

        let multi = schema(json!({"type": ["integer", "null"]}));
        let ty = multi.schema_type.unwrap();
        assert!(ty.includes("null"));
        assert!(!ty.includes("string"));
    }

    #[test]
    fn test_type_rejects_number() {
        let err = Schema::from_node(&json!({"type": 4}), &NodePath::root()).unwrap_err();
        assert_eq!(err.path, "#/type");
        assert_eq!(err.expected, "string or array of strings");
    }

    #[test]
    fn test_nested_refs_stay_unresolved() {
        let s = schema(json!({
            "type": "object",
            "properties": {
                "owner": {"$ref": "#/components/schemas/User"},
                "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}
            },
            "additionalProperties": false
        }));
        assert!(!s.properties["owner"].is_resolved());
        let tags = s.properties["tags"].item().unwrap();
        assert_eq!(
            tags.items.as_ref().and_then(|i| i.reference()).map(|r| r.target.as_str()),
            Some("#/components/schemas/Tag")
        );
        assert_eq!(s.additional_properties, Some(BoolOrSchema::Bool(false)));
    }

    #[test]
    fn test_exclusive_bounds_both_dialects() {
        let legacy = schema(json!({"minimum": 1, "exclusiveMinimum": true}));
        assert_eq!(legacy.exclusive_minimum, Some(ExclusiveBound::Flag(true)));

        let modern = schema(json!({"exclusiveMaximum": 10}));
        assert_eq!(modern.exclusive_maximum, Some(ExclusiveBound::Limit(10.0)));
    }

    #[test]
    fn test_discriminator_requires_property_name() {
        let err = Schema::from_node(
            &json!({"discriminator": {"mapping": {"a": "A"}}}),
            &NodePath::root(),
        )
        .unwrap_err();
        assert_eq!(err.path, "#/discriminator/propertyName");
    }

    #[test]
    fn test_unknown_keywords_preserved() {
        let s = schema(json!({"$id": "urn:x", "x-order": 3, "type": "string"}));
        assert_eq!(s.extensions.get("$id"), Some(&json!("urn:x")));
        assert_eq!(s.extensions.get("x-order"), Some(&json!(3)));
    }
}
