#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **node**: the generic YAML/JSON tree and pointer paths into it.
//! - **loader**: reading and decoding source files.
//! - **models**: the typed entity graph.
//! - **mapper**: generic tree → entities, references left in place.
//! - **registry**: cache of decoded external documents.
//! - **resolver**: collapses every `$ref` into its target.
//! - **validation**: post-resolution consistency checks.
//! - **document**: the parse entry points tying the stages together.

pub mod document;
pub mod loader;
pub mod mapper;
pub mod models;
pub mod node;
pub mod ref_utils;
pub mod registry;
pub mod resolver;
pub mod validation;

pub use document::{
    parse_openapi, parse_openapi_str, parse_openapi_with, parse_openapi_with_cache, ParseOptions,
    Source,
};
pub use loader::{load_file, load_str, DocumentLoader, FsLoader};
pub use mapper::{map_document, map_entity, FromNode};
pub use models::{Document, Entity, EntityKind, RefOr, Reference};
pub use node::{Node, NodePath};
pub use registry::DocumentCache;
pub use resolver::{resolve, ResolveRefs, Resolver};
pub use validation::{validate, validate_or_fail};
