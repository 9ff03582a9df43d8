//! Enhanced TypeScript/JavaScript parser.
//!
//! tree-sitter supplies the syntax tree; a per-file [`type_query::TypeQuery`]
//! supplies best-effort type classification. Nothing here reads the disk.

pub mod cache;
pub mod context;
pub mod enhanced;
pub mod extract;
pub mod imports;
pub mod jsdoc;
pub(crate) mod syntax;
pub mod type_extract;
pub mod type_query;

pub use cache::ParseCache;
pub use enhanced::EnhancedParser;
