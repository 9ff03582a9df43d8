//! Parse cache: Moka in-memory (TinyLFU admission).
//! Keyed by xxh3 of (path, content): identical content at two paths yields
//! distinct node ids, so the path is part of the key.

use moka::sync::Cache;
use strata_core::types::ast::ParserResult;
use xxhash_rust::xxh3::Xxh3;

use strata_core::constants::DEFAULT_PARSE_CACHE_CAPACITY;

pub struct ParseCache {
    inner: Cache<u64, ParserResult>,
}

/// Cache key for a file path and its content.
pub fn cache_key(path: &str, content: &str) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.update(path.as_bytes());
    // Separator so ("ab", "c") and ("a", "bc") differ.
    hasher.update(&[0]);
    hasher.update(content.as_bytes());
    hasher.digest()
}

impl ParseCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, path: &str, content: &str) -> Option<ParserResult> {
        self.inner.get(&cache_key(path, content))
    }

    pub fn insert(&self, path: &str, content: &str, result: ParserResult) {
        self.inner.insert(cache_key(path, content), result);
    }

    /// Approximate; Moka applies pending writes lazily.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_PARSE_CACHE_CAPACITY)
    }
}
