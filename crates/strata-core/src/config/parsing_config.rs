//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PARSE_CACHE_CAPACITY;

/// How far below a recognized node the traversal descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Every recognized construct at any depth.
    #[default]
    Full,
    /// Only the source file and its top-level declarations; their bodies are skipped.
    TopLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse results for identical (path, content). Default: false.
    pub enabled: Option<bool>,
    /// Maximum cached results. Default: 10,000.
    pub capacity: Option<u64>,
}

impl CacheConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn effective_capacity(&self) -> u64 {
        self.capacity.unwrap_or(DEFAULT_PARSE_CACHE_CAPACITY)
    }
}

/// Configuration for the enhanced parser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ParsingConfig {
    /// Include glob patterns; if non-empty only matching files are parsed.
    pub include: Vec<String>,
    /// Exclude glob patterns applied after `include`.
    pub exclude: Vec<String>,
    pub traversal_mode: Option<TraversalMode>,
    /// Parse `/** */` comments into JSDoc info. Default: true.
    pub extract_documentation: Option<bool>,
    /// Run the enhanced type extraction. Default: true.
    pub extract_types: Option<bool>,
    pub cache: CacheConfig,
}

impl ParsingConfig {
    pub fn effective_traversal_mode(&self) -> TraversalMode {
        self.traversal_mode.unwrap_or_default()
    }

    pub fn effective_extract_documentation(&self) -> bool {
        self.extract_documentation.unwrap_or(true)
    }

    pub fn effective_extract_types(&self) -> bool {
        self.extract_types.unwrap_or(true)
    }
}
