//! File descriptors supplied by the (external) file enumeration layer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Source dialects the enhanced parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceExtension {
    Ts,
    Tsx,
    Js,
    Jsx,
}

impl SourceExtension {
    /// Parse an extension with or without its leading dot (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "ts" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            "js" => Some(Self::Js),
            "jsx" => Some(Self::Jsx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => ".ts",
            Self::Tsx => ".tsx",
            Self::Js => ".js",
            Self::Jsx => ".jsx",
        }
    }

    /// TypeScript dialects carry type annotations the type query can read.
    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::Ts | Self::Tsx)
    }
}

impl std::fmt::Display for SourceExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file record as produced by directory enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub path: String,
    pub name: String,
    /// Extension including the leading dot, e.g. `.ts`.
    pub extension: String,
    pub size: u64,
    pub line_count: usize,
    pub last_modified: Option<u64>,
    pub content_hash: Option<String>,
}

impl FileInfo {
    /// Build a descriptor for in-memory content.
    pub fn from_content(path: impl Into<String>, content: &str) -> Self {
        let path = path.into();
        let p = Path::new(&path);
        let name = p
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = p
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        Self {
            name,
            extension,
            size: content.len() as u64,
            line_count: content.lines().count(),
            last_modified: None,
            content_hash: Some(format!("{:016x}", xxh3_64(content.as_bytes()))),
            path,
        }
    }

    pub fn source_extension(&self) -> Option<SourceExtension> {
        SourceExtension::from_extension(&self.extension)
    }
}
