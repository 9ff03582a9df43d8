//! Configuration loading errors.

use super::error_code::{self, StrataErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config value for `{field}`: {message}")]
    Invalid { field: String, message: String },
}

impl StrataErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => error_code::CONFIG_IO,
            Self::Toml(_) => error_code::CONFIG_PARSE,
            Self::Invalid { .. } => error_code::CONFIG_INVALID,
        }
    }
}
