#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads source files and decodes them into [`Node`] trees. JSON files are
//! decoded with `serde_json`; everything else goes through `serde_yaml`,
//! which also accepts most JSON.

use crate::error::LoadError;
use crate::oas::node::Node;
use std::fs;
use std::path::Path;

/// Synthetic source identifier for in-memory text.
const INLINE_SOURCE: &str = "<inline>";

/// Supplies decoded documents to the resolver.
///
/// Callers that must not block on file IO can implement this over
/// pre-fetched contents, or pre-populate a
/// [`DocumentCache`](crate::oas::registry::DocumentCache) instead.
pub trait DocumentLoader {
    /// Loads and decodes the document at `path`.
    fn load(&self, path: &Path) -> Result<Node, LoadError>;
}

/// Loads documents from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<Node, LoadError> {
        load_file(path)
    }
}

/// Reads and decodes a YAML or JSON file.
pub fn load_file(path: &Path) -> Result<Node, LoadError> {
    let label = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: label.clone(),
        message: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        decode_json(&text, &label)
    } else {
        decode_auto(&text, &label)
    }
}

/// Decodes in-memory YAML or JSON text.
pub fn load_str(text: &str) -> Result<Node, LoadError> {
    decode_auto(text, INLINE_SOURCE)
}

fn decode_auto(text: &str, label: &str) -> Result<Node, LoadError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(node) = serde_json::from_str::<Node>(text) {
            return Ok(node);
        }
    }
    decode_yaml(text, label)
}

fn decode_json(text: &str, label: &str) -> Result<Node, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::Syntax {
        path: label.to_string(),
        message: e.to_string(),
    })
}

fn decode_yaml(text: &str, label: &str) -> Result<Node, LoadError> {
    serde_yaml::from_str(text).map_err(|e| LoadError::Syntax {
        path: label.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_str_yaml_preserves_key_order() {
        let node = load_str("b: 1\na: 2\n").unwrap();
        let keys: Vec<&String> = node.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_load_str_json() {
        let node = load_str("{\t\"openapi\": \"3.1.0\"}").unwrap();
        assert_eq!(node, json!({"openapi": "3.1.0"}));
    }

    #[test]
    fn test_load_str_syntax_error() {
        let err = load_str("a: [1, 2").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { ref path, .. } if path == "<inline>"));
    }

    #[test]
    fn test_load_file_json_and_yaml() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("doc.json");
        let yaml_path = dir.path().join("doc.yml");
        fs::write(&json_path, r#"{"info": {"title": "T"}}"#).unwrap();
        fs::write(&yaml_path, "info:\n  title: T\n").unwrap();

        assert_eq!(load_file(&json_path).unwrap(), load_file(&yaml_path).unwrap());
    }

    #[test]
    fn test_load_file_missing() {
        let dir = tempdir().unwrap();
        let err = FsLoader.load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
