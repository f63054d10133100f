#![deny(missing_docs)]

//! # Schema Entities
//!
//! The Schema Object is the deepest recursion point of the model. Child
//! schemas are heap-allocated through `Box`, `Vec` or `IndexMap`, and every
//! child slot is a [`RefOr`] so it may hold a `$ref` until resolution.

use super::{Extensions, ExternalDocs, RefOr};
use crate::oas::node::Node;
use indexmap::IndexMap;
use serde::Serialize;

/// `type`: a single type name or a list of them (OpenAPI 3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `type: string`.
    Single(String),
    /// `type: [string, "null"]`.
    Multiple(Vec<String>),
}

impl SchemaType {
    /// Returns true when `name` is (one of) the declared types.
    pub fn includes(&self, name: &str) -> bool {
        match self {
            SchemaType::Single(single) => single == name,
            SchemaType::Multiple(all) => all.iter().any(|t| t == name),
        }
    }
}

/// Slots that accept either a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    /// `additionalProperties: false`.
    Bool(bool),
    /// `additionalProperties: {type: string}`.
    Schema(Box<RefOr<Schema>>),
}

/// `exclusiveMinimum`/`exclusiveMaximum`: a flag in 3.0, a bound in 3.1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    /// OpenAPI 3.0 style modifier of `minimum`/`maximum`.
    Flag(bool),
    /// OpenAPI 3.1 style standalone bound.
    Limit(f64),
}

/// Polymorphism support: which property selects the concrete schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Name of the discriminating property.
    pub property_name: String,
    /// Property values to schema names or references.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// XML serialization hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Xml {
    /// Element/attribute name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Namespace prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Serialize as attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,
    /// Wrap arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The Schema Object (JSON Schema 2020-12 superset used by OpenAPI 3.1).
///
/// Keywords that collide with Rust keywords or common method names carry a
/// distinct field name: `type` → `schema_type`, `enum` → `enum_values`,
/// `const` → `const_value`, `not` → `not`, `if` → `if_schema`,
/// `else` → `else_schema`, `then` → `then_schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    // Metadata
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Node>,
    /// Deprecation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Only present in responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Only present in requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    /// JSON Schema `examples`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Node>,
    /// OpenAPI `example`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Node>,
    /// OpenAPI 3.0 nullability flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Type and format
    /// `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// `format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    // Strings
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// ECMA 262 pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Media type of string content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,
    /// Encoding of string content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    /// Schema of decoded string content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_schema: Option<Box<RefOr<Schema>>>,

    // Numbers
    /// `multipleOf`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Inclusive maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Exclusive maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    /// Inclusive minimum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Exclusive minimum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,

    // Arrays
    /// Item schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RefOr<Schema>>>,
    /// Tuple item schemas.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefix_items: Vec<RefOr<Schema>>,
    /// Schema at least one item must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<RefOr<Schema>>>,
    /// Maximum item count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Minimum item count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Items must be unique.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// Maximum `contains` matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_contains: Option<u64>,
    /// Minimum `contains` matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_contains: Option<u64>,
    /// Schema for items not otherwise evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unevaluated_items: Option<BoolOrSchema>,

    // Objects
    /// Named property schemas.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, RefOr<Schema>>,
    /// Regex-keyed property schemas.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub pattern_properties: IndexMap<String, RefOr<Schema>>,
    /// Schema (or flag) for remaining properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<BoolOrSchema>,
    /// Maximum property count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    /// Minimum property count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    /// Required property names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Properties required when another is present.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dependent_required: IndexMap<String, Vec<String>>,
    /// Schemas applied when a property is present.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dependent_schemas: IndexMap<String, RefOr<Schema>>,
    /// Schema every property name must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_names: Option<Box<RefOr<Schema>>>,
    /// Schema for properties not otherwise evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unevaluated_properties: Option<BoolOrSchema>,

    // Composition and conditionals
    /// Must match all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<RefOr<Schema>>,
    /// Must match at least one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<RefOr<Schema>>,
    /// Must match exactly one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<RefOr<Schema>>,
    /// Must not match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<RefOr<Schema>>>,
    /// Condition schema.
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<RefOr<Schema>>>,
    /// Applied when `if` matches.
    #[serde(rename = "then", skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<RefOr<Schema>>>,
    /// Applied when `if` does not match.
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<RefOr<Schema>>>,

    // Values
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Node>>,
    /// Single allowed value.
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Node>,

    // OpenAPI vocabulary
    /// Polymorphism discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    /// XML hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,
    /// External documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// The schema that rejects every instance (`false`), i.e. `{not: {}}`.
    pub fn never() -> Self {
        Self {
            not: Some(Box::new(RefOr::T(Schema::default()))),
            ..Self::default()
        }
    }

    /// Convenience constructor for `{type: <name>}`.
    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(name.into())),
            ..Self::default()
        }
    }
}
