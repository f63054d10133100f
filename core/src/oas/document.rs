#![deny(missing_docs)]

//! # OpenAPI Document Parsing
//!
//! The entry points callers use: Load → Map → Resolve → Validate, stopping
//! at the first stage that fails.

use crate::error::{AppResult, ValidationErrors};
use crate::oas::loader::{load_str, DocumentLoader, FsLoader};
use crate::oas::mapper::map_document;
use crate::oas::models::Document;
use crate::oas::node::Node;
use crate::oas::registry::DocumentCache;
use crate::oas::resolver::{normalize_path, Resolver};
use crate::oas::validation::validate;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A YAML or JSON file, read through the loader.
    Path(PathBuf),
    /// An already-decoded tree.
    Node(Node),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<Node> for Source {
    fn from(node: Node) -> Self {
        Source::Node(node)
    }
}

/// Controls which stages [`parse_openapi_with`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replace every `$ref` with its target. Default `true`.
    pub resolve_references: bool,
    /// Directory external references are relative to. Defaults to the
    /// source file's directory, or the working directory for in-memory
    /// trees.
    pub base_path: Option<PathBuf>,
    /// Run the validator after resolution. Default `true`.
    pub validate: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            resolve_references: true,
            base_path: None,
            validate: true,
        }
    }
}

impl ParseOptions {
    /// Sets [`ParseOptions::resolve_references`].
    pub fn resolve_references(mut self, enabled: bool) -> Self {
        self.resolve_references = enabled;
        self
    }

    /// Sets [`ParseOptions::base_path`].
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Sets [`ParseOptions::validate`].
    pub fn validate(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }
}

/// Parses a document with default options.
pub fn parse_openapi(source: impl Into<Source>) -> AppResult<Document> {
    parse_openapi_with(source, &ParseOptions::default())
}

/// Parses in-memory YAML or JSON text with default options.
pub fn parse_openapi_str(text: &str) -> AppResult<Document> {
    parse_openapi(load_str(text)?)
}

/// Parses a document, reading external files from disk into a cache that
/// lives for this call only.
pub fn parse_openapi_with(source: impl Into<Source>, options: &ParseOptions) -> AppResult<Document> {
    let cache = DocumentCache::new();
    parse_openapi_with_cache(source, options, &cache, &FsLoader)
}

/// Parses a document, loading the source and any external files through
/// `loader` and keeping them in `cache`.
///
/// Reusing `cache` across calls avoids reloading shared files.
pub fn parse_openapi_with_cache(
    source: impl Into<Source>,
    options: &ParseOptions,
    cache: &DocumentCache,
    loader: &dyn DocumentLoader,
) -> AppResult<Document> {
    let (node, source_path) = match source.into() {
        Source::Path(path) => {
            let path = absolute(&path);
            (loader.load(&path)?, Some(path))
        }
        Source::Node(node) => (node, None),
    };

    let base_dir = match (&options.base_path, &source_path) {
        (Some(base), _) => absolute(base),
        (None, Some(path)) => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        (None, None) => absolute(Path::new(".")),
    };

    let mut doc = map_document(&node)?;

    if options.resolve_references {
        let mut resolver = Resolver::new(node, &base_dir, cache, loader);
        if let Some(path) = &source_path {
            resolver = resolver.with_source_path(path);
        }
        resolver.resolve_document(&mut doc)?;
    }

    if options.validate {
        let violations = validate(&doc);
        if !violations.is_empty() {
            return Err(ValidationErrors(violations).into());
        }
    }

    debug!(
        "Parsed document{}",
        source_path
            .map(|p| format!(" {}", p.display()))
            .unwrap_or_default()
    );
    Ok(doc)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    match env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(path)),
        Err(_) => normalize_path(path),
    }
}
