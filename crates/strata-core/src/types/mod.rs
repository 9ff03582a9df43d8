//! The normalized node/relation model consumed and produced by every analyzer.

pub mod ast;
pub mod collections;
pub mod file;
pub mod jsdoc;
pub mod package;
pub mod project;
pub mod relation;
pub mod type_info;
