//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, plus the
//! four failure families a parse can end in: loading, mapping, reference
//! resolution and validation.

use derive_more::{Display, From};
use std::fmt;

/// Failure to read or decode a source document.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LoadError {
    /// The file could not be read.
    #[display("unable to read '{path}': {message}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Underlying IO error message.
        message: String,
    },

    /// The text is neither valid YAML nor valid JSON.
    #[display("'{path}' is not valid YAML or JSON: {message}")]
    Syntax {
        /// Path (or `<inline>`) of the offending source.
        path: String,
        /// Decoder error message.
        message: String,
    },
}

impl std::error::Error for LoadError {}

/// The generic tree does not have the shape the target entity requires.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{path}: expected {expected}, found {found}")]
pub struct ShapeError {
    /// JSON pointer of the offending node.
    pub path: String,
    /// What the mapper expected at `path`.
    pub expected: String,
    /// What it found instead.
    pub found: String,
}

impl std::error::Error for ShapeError {}

/// The chain of reference targets that closes a cycle, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(pub Vec<String>);

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

/// Why a `$ref` could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ResolutionFailure {
    /// A pointer segment does not exist in the target document.
    #[display("target not found")]
    NotFound,

    /// The target exists but cannot fill the slot the reference occupies.
    #[display("shape mismatch: {_0}")]
    ShapeMismatch(String),

    /// The external document holding the target could not be loaded.
    #[display("external document failed to load: {_0}")]
    ExternalLoadFailed(String),

    /// The target is already being resolved further up the stack.
    #[display("circular reference: {_0}")]
    Circular(Cycle),
}

/// A `$ref` that could not be collapsed into a concrete entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceResolutionError {
    /// The `$ref` string exactly as written in the source document.
    pub pointer: String,
    /// External file the `$ref` is written in; `None` for the root document.
    pub document: Option<String>,
    /// Failure category.
    pub reason: ResolutionFailure,
}

impl ReferenceResolutionError {
    /// Builds an error for `pointer` written in the root document.
    pub fn new(pointer: impl Into<String>, reason: ResolutionFailure) -> Self {
        Self {
            pointer: pointer.into(),
            document: None,
            reason,
        }
    }

    /// Records the external file `pointer` was written in.
    pub fn in_document(mut self, document: Option<String>) -> Self {
        self.document = document;
        self
    }
}

impl fmt::Display for ReferenceResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(document) => write!(
                f,
                "cannot resolve '{}' in {}: {}",
                self.pointer, document, self.reason
            ),
            None => write!(f, "cannot resolve '{}': {}", self.pointer, self.reason),
        }
    }
}

impl std::error::Error for ReferenceResolutionError {}

/// The rule a validation violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ValidationRule {
    /// A field the document format mandates is absent.
    #[display("required-field")]
    RequiredField,
    /// A string that must carry content is blank.
    #[display("non-blank")]
    NonBlank,
    /// An Operation declares no responses.
    #[display("non-empty-responses")]
    NonEmptyResponses,
    /// A location (`in`) is not allowed for this object.
    #[display("parameter-location")]
    ParameterLocation,
    /// Path parameters must be marked `required: true`.
    #[display("path-parameter-required")]
    PathParameterRequired,
    /// A discriminator mapping names a schema that does not exist.
    #[display("discriminator-mapping")]
    DiscriminatorMapping,
    /// Two tags share a name.
    #[display("unique-tag")]
    UniqueTag,
    /// Two operations share an `operationId`.
    #[display("unique-operation-id")]
    UniqueOperationId,
    /// A server variable `enum` is empty or does not contain the default.
    #[display("server-variable")]
    ServerVariable,
    /// A security scheme lacks a field its type requires.
    #[display("security-scheme")]
    SecurityScheme,
    /// A component key contains characters outside `[a-zA-Z0-9._-]`.
    #[display("component-key")]
    ComponentKey,
}

/// A single post-resolution consistency violation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{path}: {message} [{rule}]")]
pub struct ValidationError {
    /// JSON pointer of the offending location.
    pub path: String,
    /// Rule that was broken.
    pub rule: ValidationRule,
    /// Human-readable description.
    pub message: String,
}

impl std::error::Error for ValidationError {}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns true when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// The Global Error Enum.
///
/// Mapping and resolution stop at the first failure; validation reports
/// every violation at once.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Source document could not be read or decoded.
    #[display("Load Error: {_0}")]
    Load(LoadError),

    /// Generic tree does not match the expected entity shape.
    #[display("Shape Error: {_0}")]
    Shape(ShapeError),

    /// A `$ref` could not be resolved.
    #[display("Reference Resolution Error: {_0}")]
    Reference(ReferenceResolutionError),

    /// The resolved document breaks one or more consistency rules.
    #[display("Validation Error: {_0}")]
    Validation(ValidationErrors),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Load(e) => Some(e),
            AppError::Shape(e) => Some(e),
            AppError::Reference(e) => Some(e),
            AppError::Validation(e) => Some(e),
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_shape_conversion() {
        let shape = ShapeError {
            path: "#/info".into(),
            expected: "object".into(),
            found: "string".into(),
        };
        let app_err: AppError = shape.into();
        assert!(matches!(app_err, AppError::Shape(_)));
        assert_eq!(
            app_err.to_string(),
            "Shape Error: #/info: expected object, found string"
        );
        assert!(app_err.source().is_some());
    }

    #[test]
    fn test_circular_display_lists_chain() {
        let err = ReferenceResolutionError::new(
            "#/components/schemas/A",
            ResolutionFailure::Circular(Cycle(vec![
                "#/components/schemas/A".into(),
                "#/components/schemas/B".into(),
                "#/components/schemas/A".into(),
            ])),
        );
        assert_eq!(
            err.to_string(),
            "cannot resolve '#/components/schemas/A': circular reference: \
             #/components/schemas/A -> #/components/schemas/B -> #/components/schemas/A"
        );
    }

    #[test]
    fn test_reference_error_names_external_document() {
        let err = ReferenceResolutionError::new("#/Email", ResolutionFailure::NotFound)
            .in_document(Some("/specs/shared/people.yaml".into()));
        assert_eq!(
            err.to_string(),
            "cannot resolve '#/Email' in /specs/shared/people.yaml: target not found"
        );
    }

    #[test]
    fn test_validation_errors_join() {
        let errors = ValidationErrors(vec![
            ValidationError {
                path: "#/info".into(),
                rule: ValidationRule::RequiredField,
                message: "missing 'info'".into(),
            },
            ValidationError {
                path: "#/openapi".into(),
                rule: ValidationRule::RequiredField,
                message: "missing 'openapi'".into(),
            },
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "#/info: missing 'info' [required-field]; #/openapi: missing 'openapi' [required-field]"
        );
    }
}
