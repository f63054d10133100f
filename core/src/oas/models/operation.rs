#![deny(missing_docs)]

//! # Operation Entities
//!
//! Path items, operations, and the request/response payload descriptions
//! they carry.

use super::{Extensions, ExternalDocs, RefOr, Schema, SecurityRequirement, Server};
use crate::oas::node::Node;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    /// Summary applying to all operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description applying to all operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// GET.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
    /// Alternative servers for this path.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Parameters shared by all operations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    /// HTTP method keys in declaration order.
    pub const METHODS: [&'static str; 8] = [
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ];

    /// Iterates over the defined operations with their method names.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }

    /// Mutable variant of [`PathItem::operations`].
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        [
            &mut self.get,
            &mut self.put,
            &mut self.post,
            &mut self.delete,
            &mut self.options,
            &mut self.head,
            &mut self.patch,
            &mut self.trace,
        ]
        .into_iter()
        .filter_map(Option::as_mut)
    }
}

/// A single API operation on a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tag names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Unique operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RefOr<RequestBody>>,
    /// Responses; the validator requires at least one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,
    /// Callbacks keyed by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, RefOr<Callback>>,
    /// Deprecation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Security requirements overriding the document default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Alternative servers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Status codes (or `default`) to responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Responses {
    /// Responses keyed by status code or `default`.
    #[serde(flatten)]
    pub items: IndexMap<String, RefOr<Response>>,
    /// Spec extensions (x-...).
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Responses {
    /// Returns true when no responses are declared.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// `?name=value`.
    Query,
    /// Request header.
    Header,
    /// Templated path segment.
    Path,
    /// Cookie.
    Cookie,
}

impl ParameterLocation {
    /// Every accepted value.
    pub const ALL: [Self; 4] = [Self::Query, Self::Header, Self::Path, Self::Cookie];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter value is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `;name=value`.
    Matrix,
    /// `.value`.
    Label,
    /// `name=value` (query/cookie default).
    Form,
    /// `value,value` (path/header default).
    Simple,
    /// Space separated arrays.
    SpaceDelimited,
    /// Pipe separated arrays.
    PipeDelimited,
    /// `name[key]=value`.
    DeepObject,
}

impl ParameterStyle {
    /// Every accepted value.
    pub const ALL: [Self; 7] = [
        Self::Matrix,
        Self::Label,
        Self::Form,
        Self::Simple,
        Self::SpaceDelimited,
        Self::PipeDelimited,
        Self::DeepObject,
    ];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Label => "label",
            Self::Form => "form",
            Self::Simple => "simple",
            Self::SpaceDelimited => "spaceDelimited",
            Self::PipeDelimited => "pipeDelimited",
            Self::DeepObject => "deepObject",
        }
    }
}

impl fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location, serialized as `in`.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Deprecation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Allows sending an empty value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    /// Serialization style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// Explode arrays/objects into separate parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Allow RFC 3986 reserved characters unescaped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,
    /// Value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Node>,
    /// Named examples.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Media-type keyed content (instead of `schema`).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Parameter {
    /// A parameter with only the mandatory fields set.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            style: None,
            explode: None,
            allow_reserved: None,
            schema: None,
            example: None,
            examples: IndexMap::new(),
            content: IndexMap::new(),
            extensions: Extensions::new(),
        }
    }
}

/// A single request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestBody {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media-type keyed content.
    pub content: IndexMap<String, MediaType>,
    /// Whether the body is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A single response from an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    /// Description.
    pub description: String,
    /// Response headers.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Media-type keyed content.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Design-time links.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, RefOr<Link>>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Schema and examples for one media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaType {
    /// Payload schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Node>,
    /// Named examples.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Per-property encoding (multipart / form bodies).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Encoding>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Encoding of a single schema property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    /// Content type of the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Part headers.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Serialization style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// Explode flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Allow reserved characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// An example payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Node>,
    /// URL of an external value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A design-time link from a response to another operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// URI reference to the target operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,
    /// `operationId` of the target operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameter values or runtime expressions.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Node>,
    /// Request body value or runtime expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Node>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A response or encoding header. Shaped like a Parameter without `name`/`in`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the header is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Deprecation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Allows sending an empty value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    /// Serialization style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// Explode flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Node>,
    /// Named examples.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Media-type keyed content.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Runtime expressions to the path items invoked out of band.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Callback {
    /// Path items keyed by runtime expression.
    #[serde(flatten)]
    pub expressions: IndexMap<String, RefOr<PathItem>>,
    /// Spec extensions (x-...).
    #[serde(flatten)]
    pub extensions: Extensions,
}
