#![deny(missing_docs)]

//! # Document Entities
//!
//! The root object and the metadata/component containers hanging off it.

use super::{
    Callback, Example, Extensions, Header, Link, Parameter, PathItem, RefOr, RequestBody,
    Response, Schema, SecurityRequirement, SecurityScheme,
};
use indexmap::IndexMap;
use serde::Serialize;

/// The root OpenAPI object. Owns the whole entity graph.
///
/// `openapi` and `info` are optional here; their presence is enforced by the
/// validator so that a document missing them can still be mapped and resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// OpenAPI version string, e.g. `3.1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,
    /// API metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    /// Default `$schema` for Schema Objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema_dialect: Option<String>,
    /// Server list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path templates to path items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Paths>,
    /// Incoming webhooks.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub webhooks: IndexMap<String, RefOr<PathItem>>,
    /// Reusable components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Document-wide security requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Tag metadata.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Additional external documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Document {
    /// Iterates over every `(template, path item)` pair under `paths`.
    pub fn path_items(&self) -> impl Iterator<Item = (&String, &RefOr<PathItem>)> {
        self.paths.iter().flat_map(|paths| paths.items.iter())
    }
}

/// General information about the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// API version (not the OpenAPI version).
    pub version: String,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contact {
    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// License information for the exposed API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// SPDX identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// License URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A server the API is reachable at.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Server {
    /// URL, possibly templated with `{variables}`.
    pub url: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Template variables.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A substitution value for a server URL template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerVariable {
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Default value.
    pub default: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Metadata for a single tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A link to external documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalDocs {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target URL.
    pub url: String,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Represents the Paths Object with support for specification extensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paths {
    /// Path items keyed by path template.
    #[serde(flatten)]
    pub items: IndexMap<String, RefOr<PathItem>>,
    /// Spec extensions attached to the Paths Object (x-...).
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Paths {
    /// Returns true when no path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reusable objects referenced from elsewhere in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Schemas.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, RefOr<Schema>>,
    /// Responses.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Parameters.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    /// Examples.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Request bodies.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    /// Headers.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Security schemes.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, RefOr<SecurityScheme>>,
    /// Links.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, RefOr<Link>>,
    /// Callbacks.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, RefOr<Callback>>,
    /// Path items.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub path_items: IndexMap<String, RefOr<PathItem>>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}
