#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oasr_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    #[from]
    Io(std::io::Error),

    /// A document failed to parse.
    #[display("{}", _0)]
    #[from]
    Parse(AppError),

    /// The resolved document could not be rendered.
    #[display("Output Error: {}", _0)]
    Render(String),

    /// One or more documents failed validation.
    #[display("{} document(s) failed", _0)]
    Failed(usize),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
