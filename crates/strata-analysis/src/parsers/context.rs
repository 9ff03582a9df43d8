//! Per-call parse context: syntax tree plus the type query built from it.
//!
//! Owned by a single `parse` call and dropped when it returns, so the parser
//! itself carries no per-file state.

use strata_core::errors::ParseError;
use strata_core::types::file::SourceExtension;
use tree_sitter::{Language, Parser, Tree};

use super::type_query::TypeQuery;

pub struct ParseContext<'s> {
    pub path: &'s str,
    pub source: &'s str,
    pub extension: SourceExtension,
    pub tree: Tree,
    pub types: TypeQuery,
}

/// Grammar for a dialect. `.jsx` uses the JavaScript grammar, which accepts JSX.
pub fn grammar_for(extension: SourceExtension) -> Language {
    match extension {
        SourceExtension::Ts => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        SourceExtension::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        SourceExtension::Js | SourceExtension::Jsx => tree_sitter_javascript::LANGUAGE.into(),
    }
}

impl<'s> ParseContext<'s> {
    pub fn build(
        path: &'s str,
        source: &'s str,
        extension: SourceExtension,
    ) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&grammar_for(extension))
            .map_err(|e| ParseError::SourceFileCreation {
                path: path.to_string(),
                message: format!("grammar for {extension} failed to load: {e}"),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::SourceFileCreation {
                path: path.to_string(),
                message: "tree-sitter returned no tree".to_string(),
            })?;

        let types = TypeQuery::build(&tree, source.as_bytes()).map_err(|message| {
            ParseError::TypeCheckerUnavailable {
                path: path.to_string(),
                message,
            }
        })?;

        Ok(Self {
            path,
            source,
            extension,
            tree,
            types,
        })
    }

    pub fn bytes(&self) -> &'s [u8] {
        self.source.as_bytes()
    }
}
