#![deny(missing_docs)]

//! # Reference Resolver
//!
//! Collapses every [`RefOr::Ref`] slot of a mapped document into a concrete
//! entity.
//!
//! Resolution is a depth-first walk carrying an explicit stack of the
//! targets currently being expanded:
//!
//! - local targets (`#/a/b`) are looked up in the document the reference
//!   was written in;
//! - external targets (`file.yaml#/a/b`) are joined onto the referring
//!   document's directory as file URLs and loaded through the
//!   [`DocumentCache`]; references found inside them resolve against that
//!   file, and each file is fetched at most once per resolver;
//! - a target already on the stack fails as `Circular` with the cycle;
//! - the value found is mapped onto the slot's entity kind and resolved in
//!   turn before it is substituted.
//!
//! Only the typed entity graph is modified. The generic trees used for
//! lookups are shared read-only.

mod walk;

pub use walk::ResolveRefs;

use crate::error::{Cycle, ReferenceResolutionError, ResolutionFailure};
use crate::oas::loader::DocumentLoader;
use crate::oas::mapper::FromNode;
use crate::oas::models::{Document, RefOr, Reference};
use crate::oas::node::{describe, Node, NodePath};
use crate::oas::ref_utils::{decode_pointer_segment, parse_reference};
use crate::oas::registry::DocumentCache;
use indexmap::IndexMap;
use log::trace;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ReferenceResolutionError>;

/// The document local references are looked up in.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Stack key prefix; empty for the root document.
    id: String,
    /// Normalized source path, when the document came from a file.
    path: Option<PathBuf>,
    /// Directory external targets are relative to.
    base_dir: PathBuf,
    root: Arc<Node>,
}

impl Frame {
    fn external(path: PathBuf, root: Arc<Node>) -> Self {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            id: path.display().to_string(),
            path: Some(path),
            base_dir,
            root,
        }
    }

    fn key(&self, pointer: &str) -> String {
        format!("{}#{}", self.id, pointer)
    }

    /// File named in errors raised here; `None` for the root document.
    fn document(&self) -> Option<String> {
        (!self.id.is_empty()).then(|| self.id.clone())
    }
}

/// Resolves references for one parse.
pub struct Resolver<'a> {
    cache: &'a DocumentCache,
    loader: &'a dyn DocumentLoader,
    root: Frame,
    stack: Vec<String>,
    // Held for the resolver's lifetime, so a bounded cache evicting a file
    // mid-parse does not cause a second load.
    fetched: IndexMap<PathBuf, Arc<Node>>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver whose root document is `root`, with external
    /// targets relative to `base_dir`.
    pub fn new(
        root: Node,
        base_dir: &Path,
        cache: &'a DocumentCache,
        loader: &'a dyn DocumentLoader,
    ) -> Self {
        Self {
            cache,
            loader,
            root: Frame {
                id: String::new(),
                path: None,
                base_dir: normalize_path(base_dir),
                root: Arc::new(root),
            },
            stack: Vec::new(),
            fetched: IndexMap::new(),
        }
    }

    /// Records the file the root document was read from, so external
    /// references back into it reuse the root instead of loading it again.
    pub fn with_source_path(mut self, path: &Path) -> Self {
        self.root.path = Some(normalize_path(path));
        self
    }

    /// Number of targets currently being expanded. Zero between top-level
    /// calls.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Resolves every reference in `doc` in place.
    pub fn resolve_document(&mut self, doc: &mut Document) -> ResolveResult<()> {
        self.resolve_in_root(doc)
    }

    /// Resolves every reference reachable from `value` against the root
    /// document.
    pub fn resolve_in_root<T: ResolveRefs>(&mut self, value: &mut T) -> ResolveResult<()> {
        let frame = self.root.clone();
        let result = value.resolve_refs(self, &frame);
        self.stack.clear();
        result
    }

    pub(crate) fn resolve_reference<T>(&mut self, reference: &Reference, frame: &Frame) -> ResolveResult<T>
    where
        T: FromNode + ResolveRefs,
    {
        let fail = |reason| {
            ReferenceResolutionError::new(reference.target.as_str(), reason)
                .in_document(frame.document())
        };
        let parsed = parse_reference(&reference.target);
        let target = if parsed.is_local() {
            frame.clone()
        } else {
            self.external_frame(parsed.document, frame).map_err(fail)?
        };
        let pointer = parsed.pointer();
        let key = target.key(pointer);

        if let Some(start) = self.stack.iter().position(|open| *open == key) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(key);
            return Err(fail(ResolutionFailure::Circular(Cycle(cycle))));
        }

        trace!("Resolving {} (depth {})", key, self.stack.len());
        self.stack.push(key);
        let result = self.expand::<T>(&target, pointer, &fail);
        self.stack.pop();
        result
    }

    fn expand<T>(
        &mut self,
        frame: &Frame,
        pointer: &str,
        fail: &dyn Fn(ResolutionFailure) -> ReferenceResolutionError,
    ) -> ResolveResult<T>
    where
        T: FromNode + ResolveRefs,
    {
        let node = lookup_pointer(&frame.root, pointer).map_err(fail)?;
        let mut slot = RefOr::<T>::from_node(node, &NodePath::new(frame.key(pointer)))
            .map_err(|e| fail(ResolutionFailure::ShapeMismatch(e.to_string())))?;
        slot.resolve_refs(self, frame)?;
        slot.into_item().ok_or_else(|| {
            fail(ResolutionFailure::ShapeMismatch(
                "target is still a reference after resolution".to_string(),
            ))
        })
    }

    fn external_frame(&mut self, document: &str, from: &Frame) -> Result<Frame, ResolutionFailure> {
        let path = locate(document, &from.base_dir)?;
        if self.root.path.as_deref() == Some(path.as_path()) {
            return Ok(self.root.clone());
        }
        if from.path.as_deref() == Some(path.as_path()) {
            return Ok(from.clone());
        }
        if let Some(root) = self.fetched.get(&path) {
            return Ok(Frame::external(path, Arc::clone(root)));
        }
        let root = self
            .cache
            .get_or_load(&path, self.loader)
            .map_err(|e| ResolutionFailure::ExternalLoadFailed(e.to_string()))?;
        self.fetched.insert(path.clone(), Arc::clone(&root));
        Ok(Frame::external(path, root))
    }
}

/// Resolves every reference in `doc`, returning the resolved document.
///
/// External targets are relative to `base_dir` and loaded through `cache`
/// with `loader` on a miss.
pub fn resolve(
    mut doc: Document,
    base_dir: &Path,
    cache: &DocumentCache,
    loader: &dyn DocumentLoader,
) -> ResolveResult<Document> {
    let root = serde_json::to_value(&doc).map_err(|e| {
        ReferenceResolutionError::new("#", ResolutionFailure::ShapeMismatch(e.to_string()))
    })?;
    Resolver::new(root, base_dir, cache, loader).resolve_document(&mut doc)?;
    Ok(doc)
}

/// Walks a JSON Pointer (without the leading `#`) from `root`.
///
/// The empty pointer selects `root` itself.
pub fn lookup_pointer<'n>(root: &'n Node, pointer: &str) -> Result<&'n Node, ResolutionFailure> {
    if pointer.is_empty() {
        return Ok(root);
    }
    let Some(segments) = pointer.strip_prefix('/') else {
        return Err(ResolutionFailure::ShapeMismatch(format!(
            "fragment '{}' is not a JSON pointer",
            pointer
        )));
    };

    let mut current = root;
    for raw in segments.split('/') {
        let segment = decode_pointer_segment(raw);
        current = match current {
            Node::Object(map) => map.get(&segment).ok_or(ResolutionFailure::NotFound)?,
            Node::Array(items) => {
                let idx: usize = segment.parse().map_err(|_| {
                    ResolutionFailure::ShapeMismatch(format!(
                        "array index expected, found '{}'",
                        segment
                    ))
                })?;
                items.get(idx).ok_or(ResolutionFailure::NotFound)?
            }
            scalar => {
                return Err(ResolutionFailure::ShapeMismatch(format!(
                    "cannot index into {} with '{}'",
                    describe(scalar),
                    segment
                )))
            }
        };
    }
    Ok(current)
}

/// Turns the document part of an external target into a file path.
///
/// Targets are joined onto `base_dir` with RFC 3986 reference resolution.
/// Relative base directories, which have no file URL, fall back to a
/// lexical join.
fn locate(document: &str, base_dir: &Path) -> Result<PathBuf, ResolutionFailure> {
    let Ok(base) = Url::from_directory_path(base_dir) else {
        let decoded = percent_decode_str(document).decode_utf8_lossy();
        return Ok(normalize_path(&base_dir.join(decoded.as_ref())));
    };
    let url = base.join(document).map_err(|e| {
        ResolutionFailure::ExternalLoadFailed(format!("invalid reference '{}': {}", document, e))
    })?;
    match url.scheme() {
        "file" => url.to_file_path().map_err(|_| {
            ResolutionFailure::ExternalLoadFailed(format!("'{}' is not a local file URL", document))
        }),
        // Single letters are Windows drive prefixes, not schemes.
        scheme if scheme.len() == 1 => Ok(normalize_path(Path::new(document))),
        _ => Err(ResolutionFailure::ExternalLoadFailed(format!(
            "remote reference '{}' is not supported",
            document
        ))),
    }
}

/// Removes `.` and folds `..` components without touching the file system.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
