#![deny(missing_docs)]

//! # Structural Mapper
//!
//! Converts a generic [`Node`] tree into the typed entity graph without
//! resolving references. Mapping is a depth-first descent that stops at the
//! first shape mismatch.
//!
//! - A node carrying a `$ref` key becomes a [`Reference`] wherever the slot
//!   admits one; its sibling keys other than `summary`/`description` are
//!   ignored.
//! - Enumerated fields (`in`, `style`, security scheme `type`) are checked
//!   against their closed value sets here, not during resolution.
//! - Keys the model does not know are kept in each entity's `extensions`.

mod entities;
mod reader;
mod schema;

pub(crate) use reader::ObjectReader;

use crate::error::ShapeError;
use crate::oas::models::{Entity, EntityKind, RefOr, Reference};
use crate::oas::node::{describe, Node, NodePath};
use indexmap::IndexMap;
use std::fmt::Display;

/// Result type for mapping.
pub type MapResult<T> = Result<T, ShapeError>;

/// Types that can be built from a generic node.
pub trait FromNode: Sized {
    /// Maps `node`, located at `path`, onto `Self`.
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self>;
}

pub(crate) fn shape_error(
    path: &NodePath,
    expected: impl Display,
    found: impl Display,
) -> ShapeError {
    ShapeError {
        path: path.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Maps a whole document root.
pub fn map_document(node: &Node) -> MapResult<crate::oas::models::Document> {
    FromNode::from_node(node, &NodePath::root())
}

/// Maps `node` onto the entity kind `expected`.
///
/// A node with a `$ref` key always yields [`Entity::Reference`], whatever
/// kind was asked for.
pub fn map_entity(node: &Node, expected: EntityKind, path: &NodePath) -> MapResult<Entity> {
    if is_reference(node) {
        return Reference::from_node(node, path).map(Entity::Reference);
    }
    let entity = match expected {
        EntityKind::Document => Entity::Document(Box::new(FromNode::from_node(node, path)?)),
        EntityKind::Info => Entity::Info(FromNode::from_node(node, path)?),
        EntityKind::Contact => Entity::Contact(FromNode::from_node(node, path)?),
        EntityKind::License => Entity::License(FromNode::from_node(node, path)?),
        EntityKind::Server => Entity::Server(FromNode::from_node(node, path)?),
        EntityKind::ServerVariable => Entity::ServerVariable(FromNode::from_node(node, path)?),
        EntityKind::Tag => Entity::Tag(FromNode::from_node(node, path)?),
        EntityKind::ExternalDocs => Entity::ExternalDocs(FromNode::from_node(node, path)?),
        EntityKind::Reference => Entity::Reference(FromNode::from_node(node, path)?),
        EntityKind::Xml => Entity::Xml(FromNode::from_node(node, path)?),
        EntityKind::Discriminator => Entity::Discriminator(FromNode::from_node(node, path)?),
        EntityKind::Encoding => Entity::Encoding(FromNode::from_node(node, path)?),
        EntityKind::Example => Entity::Example(FromNode::from_node(node, path)?),
        EntityKind::MediaType => Entity::MediaType(FromNode::from_node(node, path)?),
        EntityKind::Schema => Entity::Schema(Box::new(FromNode::from_node(node, path)?)),
        EntityKind::Parameter => Entity::Parameter(FromNode::from_node(node, path)?),
        EntityKind::RequestBody => Entity::RequestBody(FromNode::from_node(node, path)?),
        EntityKind::Response => Entity::Response(FromNode::from_node(node, path)?),
        EntityKind::Responses => Entity::Responses(FromNode::from_node(node, path)?),
        EntityKind::Link => Entity::Link(FromNode::from_node(node, path)?),
        EntityKind::Header => Entity::Header(FromNode::from_node(node, path)?),
        EntityKind::Callback => Entity::Callback(FromNode::from_node(node, path)?),
        EntityKind::SecurityScheme => Entity::SecurityScheme(FromNode::from_node(node, path)?),
        EntityKind::OAuthFlows => Entity::OAuthFlows(FromNode::from_node(node, path)?),
        EntityKind::OAuthFlow => Entity::OAuthFlow(FromNode::from_node(node, path)?),
        EntityKind::Operation => Entity::Operation(Box::new(FromNode::from_node(node, path)?)),
        EntityKind::PathItem => Entity::PathItem(Box::new(FromNode::from_node(node, path)?)),
        EntityKind::Paths => Entity::Paths(FromNode::from_node(node, path)?),
        EntityKind::Components => Entity::Components(Box::new(FromNode::from_node(node, path)?)),
    };
    Ok(entity)
}

fn is_reference(node: &Node) -> bool {
    node.as_object().is_some_and(|map| map.contains_key("$ref"))
}

impl FromNode for String {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        node.as_str()
            .map(str::to_string)
            .ok_or_else(|| shape_error(path, "string", describe(node)))
    }
}

impl FromNode for bool {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        node.as_bool()
            .ok_or_else(|| shape_error(path, "boolean", describe(node)))
    }
}

impl FromNode for u64 {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        node.as_u64()
            .ok_or_else(|| shape_error(path, "non-negative integer", describe(node)))
    }
}

impl FromNode for f64 {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        node.as_f64()
            .ok_or_else(|| shape_error(path, "number", describe(node)))
    }
}

impl FromNode for Node {
    fn from_node(node: &Node, _path: &NodePath) -> MapResult<Self> {
        Ok(node.clone())
    }
}

impl<T: FromNode> FromNode for Box<T> {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        T::from_node(node, path).map(Box::new)
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let Some(items) = node.as_array() else {
            return Err(shape_error(path, "array", describe(node)));
        };
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| T::from_node(item, &path.index(idx)))
            .collect()
    }
}

impl<T: FromNode> FromNode for IndexMap<String, T> {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let Some(map) = node.as_object() else {
            return Err(shape_error(path, "object", describe(node)));
        };
        map.iter()
            .map(|(key, value)| T::from_node(value, &path.push(key)).map(|item| (key.clone(), item)))
            .collect()
    }
}

impl<T: FromNode> FromNode for RefOr<T> {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        if is_reference(node) {
            Reference::from_node(node, path).map(RefOr::Ref)
        } else {
            T::from_node(node, path).map(RefOr::T)
        }
    }
}

impl FromNode for Reference {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let Some(map) = node.as_object() else {
            return Err(shape_error(path, EntityKind::Reference, describe(node)));
        };
        let string_field = |key: &str| -> MapResult<Option<String>> {
            match map.get(key) {
                None | Some(Node::Null) => Ok(None),
                Some(value) => String::from_node(value, &path.push(key)).map(Some),
            }
        };
        let target = string_field("$ref")?.ok_or_else(|| {
            shape_error(
                &path.push("$ref"),
                format!("required field of {}", EntityKind::Reference),
                "nothing",
            )
        })?;
        Ok(Reference {
            target,
            summary: string_field("summary")?,
            description: string_field("description")?,
        })
    }
}

/// Maps a string node onto one member of a closed value set.
pub(crate) fn closed_enum<E: Copy>(
    node: &Node,
    path: &NodePath,
    all: &[E],
    name: fn(&E) -> &'static str,
) -> MapResult<E> {
    let expected = || {
        let names: Vec<&str> = all.iter().map(name).collect();
        format!("one of {}", names.join(", "))
    };
    let Some(raw) = node.as_str() else {
        return Err(shape_error(path, expected(), describe(node)));
    };
    all.iter()
        .copied()
        .find(|candidate| name(candidate) == raw)
        .ok_or_else(|| shape_error(path, expected(), describe(node)))
}

/// Splits an object into `x-` extensions and mapped items (Paths, Responses,
/// Callback expressions).
pub(crate) fn extensible_map<T: FromNode>(
    node: &Node,
    path: &NodePath,
    kind: EntityKind,
) -> MapResult<(IndexMap<String, T>, crate::oas::models::Extensions)> {
    let reader = ObjectReader::new(node, path, kind)?;
    let mut items = IndexMap::new();
    let mut extensions = IndexMap::new();
    for (key, value) in reader.finish() {
        if key.starts_with("x-") {
            extensions.insert(key, value);
            continue;
        }
        let item = T::from_node(&value, &path.push(&key))?;
        items.insert(key, item);
    }
    Ok((items, extensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{Parameter, Schema};
    use serde_json::json;

    #[test]
    fn test_ref_or_prefers_reference() {
        let node = json!({"$ref": "#/components/schemas/S", "type": "string"});
        let slot: RefOr<Schema> = RefOr::from_node(&node, &NodePath::root()).unwrap();
        assert_eq!(
            slot.reference().map(|r| r.target.as_str()),
            Some("#/components/schemas/S")
        );
    }

    #[test]
    fn test_reference_keeps_summary_and_description_only() {
        let node = json!({"$ref": "#/x", "summary": "s", "description": "d", "extra": 1});
        let reference = Reference::from_node(&node, &NodePath::root()).unwrap();
        assert_eq!(reference.summary.as_deref(), Some("s"));
        assert_eq!(reference.description.as_deref(), Some("d"));
    }

    #[test]
    fn test_reference_target_must_be_string() {
        let node = json!({"$ref": 3});
        let err = Reference::from_node(&node, &NodePath::root()).unwrap_err();
        assert_eq!(err.path, "#/$ref");
        assert_eq!(err.expected, "string");
    }

    #[test]
    fn test_vec_error_path_has_index() {
        let node = json!(["a", 1]);
        let err = Vec::<String>::from_node(&node, &NodePath::root().push("tags")).unwrap_err();
        assert_eq!(err.path, "#/tags/1");
        assert_eq!(err.found, "number 1");
    }

    #[test]
    fn test_map_entity_reference_regardless_of_kind() {
        let node = json!({"$ref": "#/components/parameters/P"});
        let entity = map_entity(&node, EntityKind::Parameter, &NodePath::root()).unwrap();
        assert_eq!(entity.kind(), EntityKind::Reference);
    }

    #[test]
    fn test_map_entity_parameter() {
        let node = json!({"name": "id", "in": "path", "required": true});
        let entity = map_entity(&node, EntityKind::Parameter, &NodePath::root()).unwrap();
        match entity {
            Entity::Parameter(Parameter { name, .. }) => assert_eq!(name, "id"),
            other => panic!("unexpected entity {:?}", other.kind()),
        }
    }

    #[test]
    fn test_map_entity_shape_error_reports_kind() {
        let node = json!("not an object");
        let err = map_entity(&node, EntityKind::Info, &NodePath::root()).unwrap_err();
        assert_eq!(err.expected, "Info");
        assert_eq!(err.found, "string \"not an object\"");
    }
}
