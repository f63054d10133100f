#![deny(missing_docs)]

//! # OASR Core
//!
//! Parses OpenAPI documents into a typed entity graph with every `$ref`
//! resolved, local or across files.
//!
//! ```no_run
//! use oasr_core::parse_openapi;
//! use std::path::Path;
//!
//! let doc = parse_openapi(Path::new("openapi.yaml"))?;
//! println!("{}", doc.info.map(|i| i.title).unwrap_or_default());
//! # Ok::<(), oasr_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) parsing.
pub mod oas;

pub use error::{
    AppError, AppResult, Cycle, LoadError, ReferenceResolutionError, ResolutionFailure,
    ShapeError, ValidationError, ValidationErrors, ValidationRule,
};
pub use oas::{
    parse_openapi, parse_openapi_str, parse_openapi_with, parse_openapi_with_cache,
    DocumentCache, DocumentLoader, FsLoader, ParseOptions, Source,
};
