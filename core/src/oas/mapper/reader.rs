//! # Object Reader
//!
//! Field-by-field access to an object node. Every key read is recorded so
//! whatever is left over can be kept as opaque extension data.

use super::{shape_error, FromNode, MapResult};
use crate::oas::models::{EntityKind, Extensions};
use crate::oas::node::{describe, Node, NodeMap, NodePath};
use std::collections::HashSet;

/// Cursor over the fields of one object node.
pub(crate) struct ObjectReader<'a> {
    map: &'a NodeMap,
    path: &'a NodePath,
    kind: EntityKind,
    consumed: HashSet<&'static str>,
}

impl<'a> ObjectReader<'a> {
    /// Opens `node` as an entity of `kind`.
    ///
    /// Fails when the node is not an object, or when it is a `$ref` sitting in
    /// a slot that does not admit references.
    pub(crate) fn new(node: &'a Node, path: &'a NodePath, kind: EntityKind) -> MapResult<Self> {
        let Some(map) = node.as_object() else {
            return Err(shape_error(path, kind, describe(node)));
        };
        if map.contains_key("$ref") {
            return Err(shape_error(
                path,
                format!("{} (references are not permitted here)", kind),
                "reference",
            ));
        }
        Ok(Self {
            map,
            path,
            kind,
            consumed: HashSet::new(),
        })
    }

    /// The path of the object being read.
    pub(crate) fn path(&self) -> &NodePath {
        self.path
    }

    /// Maps `key` if present. `null` counts as absent.
    pub(crate) fn optional<T: FromNode>(&mut self, key: &'static str) -> MapResult<Option<T>> {
        self.consumed.insert(key);
        match self.map.get(key) {
            None | Some(Node::Null) => Ok(None),
            Some(node) => T::from_node(node, &self.path.push(key)).map(Some),
        }
    }

    /// Maps `key`, failing when it is absent.
    pub(crate) fn required<T: FromNode>(&mut self, key: &'static str) -> MapResult<T> {
        match self.optional(key)? {
            Some(value) => Ok(value),
            None => Err(shape_error(
                &self.path.push(key),
                format!("required field of {}", self.kind),
                "nothing",
            )),
        }
    }

    /// Maps an optional collection, absent meaning empty.
    pub(crate) fn collection<T: FromNode + Default>(&mut self, key: &'static str) -> MapResult<T> {
        Ok(self.optional(key)?.unwrap_or_default())
    }

    /// Returns every key that was never read, in document order.
    pub(crate) fn finish(self) -> Extensions {
        self.map
            .iter()
            .filter(|(key, _)| !self.consumed.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finish_keeps_unread_keys_in_order() {
        let node = json!({"name": "n", "x-b": 1, "x-a": 2});
        let path = NodePath::root();
        let mut reader = ObjectReader::new(&node, &path, EntityKind::Tag).unwrap();
        let name: String = reader.required("name").unwrap();
        assert_eq!(name, "n");

        let rest = reader.finish();
        let keys: Vec<&String> = rest.keys().collect();
        assert_eq!(keys, vec!["x-b", "x-a"]);
    }

    #[test]
    fn test_required_missing_names_path() {
        let node = json!({});
        let path = NodePath::root().push("info");
        let mut reader = ObjectReader::new(&node, &path, EntityKind::Info).unwrap();
        let err = reader.required::<String>("title").unwrap_err();
        assert_eq!(err.path, "#/info/title");
        assert_eq!(err.expected, "required field of Info");
        assert_eq!(err.found, "nothing");
    }

    #[test]
    fn test_null_is_absent() {
        let node = json!({"description": null});
        let path = NodePath::root();
        let mut reader = ObjectReader::new(&node, &path, EntityKind::Tag).unwrap();
        let desc: Option<String> = reader.optional("description").unwrap();
        assert!(desc.is_none());
    }

    #[test]
    fn test_reference_rejected_in_plain_slot() {
        let node = json!({"$ref": "#/components/x"});
        let path = NodePath::root();
        let err = ObjectReader::new(&node, &path, EntityKind::MediaType).err().unwrap();
        assert_eq!(err.found, "reference");
    }
}
