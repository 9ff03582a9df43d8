//! Enhanced parser errors.

use super::error_code::{self, StrataErrorCode};
use crate::constants::SUPPORTED_EXTENSIONS;

/// Failures that abort a single file's parse. No partial result is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("File path must not be empty")]
    EmptyPath,

    #[error(
        "Unsupported file extension '{extension}' for {path} (expected one of {})",
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedExtension { path: String, extension: String },

    #[error("Failed to create source file for {path}: {message}")]
    SourceFileCreation { path: String, message: String },

    #[error("Type checker unavailable for {path}: {message}")]
    TypeCheckerUnavailable { path: String, message: String },
}

impl StrataErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPath => error_code::EMPTY_PATH,
            Self::UnsupportedExtension { .. } => error_code::UNSUPPORTED_EXTENSION,
            Self::SourceFileCreation { .. } => error_code::SOURCE_FILE_CREATION,
            Self::TypeCheckerUnavailable { .. } => error_code::TYPE_CHECKER_UNAVAILABLE,
        }
    }
}
