//! # strata-core
//!
//! Foundation crate for the Strata TypeScript/JavaScript analysis engine.
//! Defines the node/relation model, errors, config, logging, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::StrataConfig;
pub use errors::error_code::StrataErrorCode;
pub use errors::{AnalysisError, ConfigError, ParseError};
pub use types::ast::{AstNode, NodeType, ParserResult};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::relation::{Relation, RelationMetadata, RelationType};
