//! # Generic Nodes
//!
//! The untyped tree produced by the YAML/JSON decoder, and the JSON Pointer
//! paths used to report where in that tree something went wrong.

use crate::oas::ref_utils::encode_pointer_segment;
use std::fmt;

/// An already-decoded YAML/JSON value with insertion-ordered object keys.
pub type Node = serde_json::Value;

/// An insertion-ordered object node.
pub type NodeMap = serde_json::Map<String, Node>;

/// Short description of a node for diagnostics, e.g. `string "body"`.
pub fn describe(node: &Node) -> String {
    match node {
        Node::Object(_) => "object".to_string(),
        Node::Array(_) => "array".to_string(),
        Node::String(s) => format!("string {:?}", s),
        Node::Number(n) => format!("number {}", n),
        Node::Bool(b) => format!("boolean {}", b),
        Node::Null => "null".to_string(),
    }
}

/// A JSON Pointer (with leading `#`) into a source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    /// The document root, `#`.
    pub fn root() -> Self {
        Self("#".to_string())
    }

    /// A path with an explicit prefix, e.g. `other.yaml#/components`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Appends an object key, escaping `~` and `/`.
    pub fn push(&self, key: &str) -> Self {
        Self(format!("{}/{}", self.0, encode_pointer_segment(key)))
    }

    /// Appends an array index.
    pub fn index(&self, idx: usize) -> Self {
        Self(format!("{}/{}", self.0, idx))
    }

    /// The pointer as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_escapes_path_templates() {
        let path = NodePath::root().push("paths").push("/pets/{id}").push("get");
        assert_eq!(path.as_str(), "#/paths/~1pets~1{id}/get");
    }

    #[test]
    fn test_path_index() {
        let path = NodePath::root().push("tags").index(2);
        assert_eq!(path.to_string(), "#/tags/2");
    }

    #[test]
    fn test_describe_scalars() {
        assert_eq!(describe(&json!("body")), "string \"body\"");
        assert_eq!(describe(&json!(3)), "number 3");
        assert_eq!(describe(&json!(null)), "null");
        assert_eq!(describe(&json!({"a": 1})), "object");
    }
}
