//! Project-level analysis errors (input validation).

use super::error_code::{self, StrataErrorCode};

/// Input-validation failures raised before any analysis work begins.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Project root path must not be empty")]
    MissingRootPath,

    #[error("Invalid project input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrataErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRootPath => error_code::MISSING_ROOT_PATH,
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            Self::Json(_) => error_code::JSON_ERROR,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
