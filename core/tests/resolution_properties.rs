use oasr_core::oas::{map_document, resolve, Node, Resolver};
use oasr_core::{DocumentCache, DocumentLoader, LoadError, ResolutionFailure};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::Cell;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Serves `other.yaml` from memory and counts how often it is asked for.
struct MockLoader {
    loads: Cell<usize>,
}

impl DocumentLoader for MockLoader {
    fn load(&self, path: &Path) -> Result<Node, LoadError> {
        self.loads.set(self.loads.get() + 1);
        if path == Path::new("/specs/other.yaml") {
            Ok(json!({"components": {"schemas": {"Foo": {"type": "string", "maxLength": 8}}}}))
        } else {
            Err(LoadError::Io {
                path: path.display().to_string(),
                message: "not mocked".to_string(),
            })
        }
    }
}

fn mock() -> MockLoader {
    MockLoader {
        loads: Cell::new(0),
    }
}

#[test]
fn test_external_target_used_twice_loads_once() {
    let node = json!({
        "openapi": "3.1.0",
        "components": {"schemas": {
            "First": {"$ref": "other.yaml#/components/schemas/Foo"},
            "Second": {"type": "array", "items": {"$ref": "other.yaml#/components/schemas/Foo"}}
        }}
    });
    let doc = map_document(&node).unwrap();
    let cache = DocumentCache::new();
    let loader = mock();

    let doc = resolve(doc, Path::new("/specs"), &cache, &loader).unwrap();

    assert_eq!(loader.loads.get(), 1);
    let schemas = &doc.components.as_ref().unwrap().schemas;
    let first = schemas["First"].item().unwrap();
    let second = schemas["Second"].item().unwrap();
    assert_eq!(first.max_length, Some(8));
    assert_eq!(second.items.as_ref().and_then(|i| i.item()), Some(first));
}

#[test]
fn test_document_without_references_is_unchanged() {
    let node = json!({
        "openapi": "3.1.0",
        "info": {"title": "T", "version": "1"},
        "paths": {"/a": {"get": {"responses": {"204": {"description": "none"}}}}},
        "x-origin": "inline"
    });
    let doc = map_document(&node).unwrap();
    let cache = DocumentCache::new();
    let loader = mock();

    let resolved = resolve(doc.clone(), Path::new("/"), &cache, &loader).unwrap();
    assert_eq!(resolved, doc);
    assert_eq!(loader.loads.get(), 0);
}

#[test]
fn test_local_only_resolution_is_repeatable() {
    let node = json!({
        "components": {
            "schemas": {"Name": {"type": "string"}},
            "parameters": {
                "name": {"name": "name", "in": "query", "schema": {"$ref": "#/components/schemas/Name"}}
            }
        },
        "paths": {"/users": {"get": {
            "parameters": [{"$ref": "#/components/parameters/name"}],
            "responses": {"200": {"description": "ok"}}
        }}}
    });
    let cache = DocumentCache::new();
    let loader = mock();

    let mut resolver = Resolver::new(node.clone(), Path::new("/"), &cache, &loader);
    let mut first = map_document(&node).unwrap();
    resolver.resolve_document(&mut first).unwrap();
    assert_eq!(resolver.stack_depth(), 0);

    let mut second = map_document(&node).unwrap();
    resolver.resolve_document(&mut second).unwrap();
    assert_eq!(resolver.stack_depth(), 0);

    assert_eq!(first, second);
}

#[test]
fn test_stack_is_empty_after_failure() {
    let node = json!({"components": {"schemas": {
        "A": {"allOf": [{"$ref": "#/components/schemas/B"}]},
        "B": {"not": {"$ref": "#/components/schemas/A"}}
    }}});
    let cache = DocumentCache::new();
    let loader = mock();
    let mut resolver = Resolver::new(node.clone(), Path::new("/"), &cache, &loader);

    let mut doc = map_document(&node).unwrap();
    let err = resolver.resolve_document(&mut doc).unwrap_err();
    assert!(matches!(err.reason, ResolutionFailure::Circular(_)));
    assert_eq!(resolver.stack_depth(), 0);
}

/// Thread-safe variant of [`MockLoader`].
struct SharedLoader {
    loads: AtomicUsize,
}

impl DocumentLoader for SharedLoader {
    fn load(&self, path: &Path) -> Result<Node, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        mock().load(path)
    }
}

#[test]
fn test_concurrent_resolutions_share_one_cache() {
    let node = json!({"components": {"schemas": {
        "Name": {"$ref": "other.yaml#/components/schemas/Foo"}
    }}});
    let cache = DocumentCache::new();
    let loader = SharedLoader {
        loads: AtomicUsize::new(0),
    };

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let doc = map_document(&node).unwrap();
                let doc = resolve(doc, Path::new("/specs"), &cache, &loader).unwrap();
                let name = doc.components.as_ref().unwrap().schemas["Name"].item().unwrap();
                assert_eq!(name.max_length, Some(8));
            });
        }
    });

    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}
