#![deny(missing_docs)]

//! # Entity Schema
//!
//! Strongly-typed representation of an OpenAPI document.
//!
//! - **document**: root object, metadata, components.
//! - **operation**: path items, operations and everything they carry.
//! - **schema**: the self-recursive Schema Object.
//! - **security**: security schemes and OAuth flows.
//!
//! Any slot that may hold a `$ref` is typed as [`RefOr`]. Resolution collapses
//! every such slot to [`RefOr::T`].

pub mod document;
pub mod operation;
pub mod schema;
pub mod security;

pub use document::{
    Components, Contact, Document, ExternalDocs, Info, License, Paths, Server, ServerVariable,
    Tag,
};
pub use operation::{
    Callback, Encoding, Example, Header, Link, MediaType, Operation, Parameter, ParameterLocation,
    ParameterStyle, PathItem, RequestBody, Response, Responses,
};
pub use schema::{BoolOrSchema, Discriminator, ExclusiveBound, Schema, SchemaType, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme, SecuritySchemeType};

use crate::oas::node::Node;
use derive_more::Display;
use indexmap::IndexMap;
use serde::Serialize;

/// Unknown keys kept verbatim (vendor `x-` extensions and anything else).
pub type Extensions = IndexMap<String, Node>;

/// The closed set of entity kinds the mapper can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntityKind {
    /// Root OpenAPI object.
    Document,
    /// API metadata.
    Info,
    /// Contact information.
    Contact,
    /// License information.
    License,
    /// Server entry.
    Server,
    /// Server URL template variable.
    ServerVariable,
    /// Tag metadata.
    Tag,
    /// External documentation link.
    ExternalDocs,
    /// `$ref` indirection.
    Reference,
    /// XML serialization hints.
    Xml,
    /// Polymorphism discriminator.
    Discriminator,
    /// Per-property multipart encoding.
    Encoding,
    /// Example value.
    Example,
    /// Media type payload description.
    MediaType,
    /// JSON Schema.
    Schema,
    /// Operation parameter.
    Parameter,
    /// Request body.
    RequestBody,
    /// Single response.
    Response,
    /// Response map of an operation.
    Responses,
    /// Design-time link.
    Link,
    /// Response header.
    Header,
    /// Out-of-band callback map.
    Callback,
    /// Security scheme definition.
    SecurityScheme,
    /// OAuth flow set.
    OAuthFlows,
    /// Single OAuth flow.
    OAuthFlow,
    /// Operation on a path.
    Operation,
    /// Operations available on a path.
    PathItem,
    /// Paths object.
    Paths,
    /// Reusable components.
    Components,
}

/// An indirection node (`$ref`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Target: `#/a/b` (local) or `file.yaml#/a/b` (external).
    #[serde(rename = "$ref")]
    pub target: String,
    /// Overrides the target's summary when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Overrides the target's description when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reference {
    /// A bare reference to `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            summary: None,
            description: None,
        }
    }
}

/// A slot holding either a concrete entity or an unresolved reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// Unresolved `$ref`.
    Ref(Reference),
    /// Concrete value.
    T(T),
}

impl<T> RefOr<T> {
    /// The concrete value, if resolved.
    pub fn item(&self) -> Option<&T> {
        match self {
            RefOr::T(item) => Some(item),
            RefOr::Ref(_) => None,
        }
    }

    /// Mutable access to the concrete value, if resolved.
    pub fn item_mut(&mut self) -> Option<&mut T> {
        match self {
            RefOr::T(item) => Some(item),
            RefOr::Ref(_) => None,
        }
    }

    /// Consumes the slot, returning the concrete value if resolved.
    pub fn into_item(self) -> Option<T> {
        match self {
            RefOr::T(item) => Some(item),
            RefOr::Ref(_) => None,
        }
    }

    /// The pending reference, if unresolved.
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            RefOr::Ref(r) => Some(r),
            RefOr::T(_) => None,
        }
    }

    /// Returns true once the slot holds a concrete value.
    pub fn is_resolved(&self) -> bool {
        matches!(self, RefOr::T(_))
    }
}

impl<T> From<T> for RefOr<T> {
    fn from(item: T) -> Self {
        RefOr::T(item)
    }
}

/// A mapped entity of any kind, as returned by
/// [`map_entity`](crate::oas::mapper::map_entity).
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Entity {
    Document(Box<Document>),
    Info(Info),
    Contact(Contact),
    License(License),
    Server(Server),
    ServerVariable(ServerVariable),
    Tag(Tag),
    ExternalDocs(ExternalDocs),
    Reference(Reference),
    Xml(Xml),
    Discriminator(Discriminator),
    Encoding(Encoding),
    Example(Example),
    MediaType(MediaType),
    Schema(Box<Schema>),
    Parameter(Parameter),
    RequestBody(RequestBody),
    Response(Response),
    Responses(Responses),
    Link(Link),
    Header(Header),
    Callback(Callback),
    SecurityScheme(SecurityScheme),
    OAuthFlows(OAuthFlows),
    OAuthFlow(OAuthFlow),
    Operation(Box<Operation>),
    PathItem(Box<PathItem>),
    Paths(Paths),
    Components(Box<Components>),
}

impl Entity {
    /// Kind of the wrapped entity.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Document(_) => EntityKind::Document,
            Entity::Info(_) => EntityKind::Info,
            Entity::Contact(_) => EntityKind::Contact,
            Entity::License(_) => EntityKind::License,
            Entity::Server(_) => EntityKind::Server,
            Entity::ServerVariable(_) => EntityKind::ServerVariable,
            Entity::Tag(_) => EntityKind::Tag,
            Entity::ExternalDocs(_) => EntityKind::ExternalDocs,
            Entity::Reference(_) => EntityKind::Reference,
            Entity::Xml(_) => EntityKind::Xml,
            Entity::Discriminator(_) => EntityKind::Discriminator,
            Entity::Encoding(_) => EntityKind::Encoding,
            Entity::Example(_) => EntityKind::Example,
            Entity::MediaType(_) => EntityKind::MediaType,
            Entity::Schema(_) => EntityKind::Schema,
            Entity::Parameter(_) => EntityKind::Parameter,
            Entity::RequestBody(_) => EntityKind::RequestBody,
            Entity::Response(_) => EntityKind::Response,
            Entity::Responses(_) => EntityKind::Responses,
            Entity::Link(_) => EntityKind::Link,
            Entity::Header(_) => EntityKind::Header,
            Entity::Callback(_) => EntityKind::Callback,
            Entity::SecurityScheme(_) => EntityKind::SecurityScheme,
            Entity::OAuthFlows(_) => EntityKind::OAuthFlows,
            Entity::OAuthFlow(_) => EntityKind::OAuthFlow,
            Entity::Operation(_) => EntityKind::Operation,
            Entity::PathItem(_) => EntityKind::PathItem,
            Entity::Paths(_) => EntityKind::Paths,
            Entity::Components(_) => EntityKind::Components,
        }
    }
}
