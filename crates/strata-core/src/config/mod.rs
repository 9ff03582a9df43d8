//! Configuration for every subsystem, loaded from TOML.
//!
//! Every field is optional; `effective_*` accessors supply the defaults.

pub mod analysis_config;
pub mod parsing_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use analysis_config::{
    ComplexityConfig, DependencyConfig, EntryPointConfig, StructureConfig,
    DEFAULT_ENTRY_PATTERNS,
};
pub use parsing_config::{CacheConfig, ParsingConfig, TraversalMode};

use crate::errors::ConfigError;

/// Top-level configuration (`strata.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StrataConfig {
    pub parsing: ParsingConfig,
    pub dependencies: DependencyConfig,
    pub entry_points: EntryPointConfig,
    pub complexity: ComplexityConfig,
    pub structure: StructureConfig,
}

impl StrataConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values no analyzer can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parsing.cache.capacity == Some(0) {
            return Err(ConfigError::Invalid {
                field: "parsing.cache.capacity".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.dependencies.max_depth == Some(0) {
            return Err(ConfigError::Invalid {
                field: "dependencies.max_depth".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.complexity.threshold == Some(0) {
            return Err(ConfigError::Invalid {
                field: "complexity.threshold".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        let empty_pattern = self
            .parsing
            .include
            .iter()
            .chain(&self.parsing.exclude)
            .chain(&self.dependencies.include_patterns)
            .chain(&self.dependencies.exclude_patterns)
            .any(|p| p.trim().is_empty());
        if empty_pattern {
            return Err(ConfigError::Invalid {
                field: "patterns".to_string(),
                message: "glob patterns must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
