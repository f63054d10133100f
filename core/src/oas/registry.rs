#![deny(missing_docs)]

//! # Document Cache
//!
//! Holds decoded external documents for reference resolution, keyed by
//! normalized file path. A cache is owned by the caller and passed into each
//! parse, so reuse across parses is explicit.
//!
//! The check-then-load sequence runs under a single lock: concurrent parses
//! sharing one cache never load the same file twice.

use crate::error::LoadError;
use crate::oas::loader::DocumentLoader;
use crate::oas::node::Node;
use indexmap::IndexMap;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Decoded external documents keyed by path.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: Mutex<IndexMap<PathBuf, Arc<Node>>>,
    capacity: Option<usize>,
}

impl DocumentCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that evicts its oldest entry once `capacity`
    /// documents are held. A capacity of zero is treated as one.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::default(),
            capacity: Some(capacity.max(1)),
        }
    }

    /// Maximum number of documents held, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Returns the cached document at `path`, loading it through `loader`
    /// on a miss. Load failures are not cached.
    pub fn get_or_load(
        &self,
        path: &Path,
        loader: &dyn DocumentLoader,
    ) -> Result<Arc<Node>, LoadError> {
        let mut entries = self.lock();
        if let Some(node) = entries.get(path) {
            debug!("Document cache hit: {}", path.display());
            return Ok(Arc::clone(node));
        }

        debug!("Loading external document: {}", path.display());
        let node = Arc::new(loader.load(path)?);
        self.store(&mut entries, path.to_path_buf(), Arc::clone(&node));
        Ok(node)
    }

    /// Inserts an already-decoded document, replacing any previous entry.
    ///
    /// Callers that must not perform IO during resolution pre-load every
    /// external file this way.
    pub fn insert(&self, path: impl Into<PathBuf>, node: Node) {
        let mut entries = self.lock();
        self.store(&mut entries, path.into(), Arc::new(node));
    }

    /// Returns true when `path` is cached.
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every cached document.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn store(&self, entries: &mut IndexMap<PathBuf, Arc<Node>>, path: PathBuf, node: Arc<Node>) {
        entries.insert(path, node);
        if let Some(capacity) = self.capacity {
            while entries.len() > capacity {
                if let Some((evicted, _)) = entries.shift_remove_index(0) {
                    warn!("Document cache full, evicting {}", evicted.display());
                }
            }
        }
    }

    // A panic elsewhere cannot leave the map half-updated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, IndexMap<PathBuf, Arc<Node>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    struct CountingLoader {
        loads: Cell<usize>,
    }

    impl DocumentLoader for CountingLoader {
        fn load(&self, path: &Path) -> Result<Node, LoadError> {
            self.loads.set(self.loads.get() + 1);
            if path.ends_with("missing.yaml") {
                return Err(LoadError::Io {
                    path: path.display().to_string(),
                    message: "not found".to_string(),
                });
            }
            Ok(json!({"file": path.display().to_string()}))
        }
    }

    fn loader() -> CountingLoader {
        CountingLoader {
            loads: Cell::new(0),
        }
    }

    #[test]
    fn test_get_or_load_loads_once() {
        let cache = DocumentCache::new();
        let loader = loader();
        let first = cache.get_or_load(Path::new("/a/common.yaml"), &loader).unwrap();
        let second = cache.get_or_load(Path::new("/a/common.yaml"), &loader).unwrap();
        assert_eq!(loader.loads.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_get_or_load_loads_once() {
        struct SlowLoader {
            loads: AtomicUsize,
        }

        impl DocumentLoader for SlowLoader {
            fn load(&self, _path: &Path) -> Result<Node, LoadError> {
                self.loads.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                Ok(json!({"shared": true}))
            }
        }

        let cache = DocumentCache::new();
        let loader = SlowLoader {
            loads: AtomicUsize::new(0),
        };
        let nodes: Vec<Arc<Node>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_load(Path::new("/a/shared.yaml"), &loader)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
        assert!(nodes.iter().all(|n| Arc::ptr_eq(n, &nodes[0])));
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache = DocumentCache::new();
        let loader = loader();
        assert!(cache.get_or_load(Path::new("/a/missing.yaml"), &loader).is_err());
        assert!(cache.get_or_load(Path::new("/a/missing.yaml"), &loader).is_err());
        assert_eq!(loader.loads.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_bypasses_loader() {
        let cache = DocumentCache::new();
        cache.insert("/a/pre.yaml", json!({"x": 1}));
        let loader = loader();
        let node = cache.get_or_load(Path::new("/a/pre.yaml"), &loader).unwrap();
        assert_eq!(*node, json!({"x": 1}));
        assert_eq!(loader.loads.get(), 0);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let cache = DocumentCache::bounded(2);
        let loader = loader();
        for name in ["/a.yaml", "/b.yaml", "/c.yaml"] {
            cache.get_or_load(Path::new(name), &loader).unwrap();
        }
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(Path::new("/a.yaml")));
        assert!(cache.contains(Path::new("/c.yaml")));
    }

    #[test]
    fn test_bounded_zero_keeps_one() {
        let cache = DocumentCache::bounded(0);
        assert_eq!(cache.capacity(), Some(1));
        cache.insert("/a.yaml", json!({}));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = DocumentCache::new();
        cache.insert("/a.yaml", json!({}));
        cache.clear();
        assert!(cache.is_empty());
    }
}
