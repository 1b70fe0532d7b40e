//! Resolved document cache
//!
//! Entries are keyed by document path, a hash of its content and the live
//! price spliced into the context. Editing the file changes the hash, so a
//! stale entry is never served. Per document only the unpriced resolution
//! and the most recent priced one are kept.

use super::{DocumentFormat, ScenarioBook, ScenarioError};
use rust_decimal::Decimal;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    content_hash: u64,
    current_price: Option<Decimal>,
}

/// Caches resolved scenario books
#[derive(Debug, Default)]
pub struct ScenarioCache {
    entries: HashMap<CacheKey, Arc<ScenarioBook>>,
    hits: u64,
    misses: u64,
}

impl ScenarioCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing a previous resolution when the key matches
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        current_price: Option<Decimal>,
    ) -> Result<Arc<ScenarioBook>, ScenarioError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let key = CacheKey {
            path: path.to_path_buf(),
            content_hash: content_hash(&content),
            current_price,
        };

        if let Some(book) = self.entries.get(&key) {
            self.hits += 1;
            tracing::trace!(path = %path.display(), "Scenario cache hit");
            return Ok(Arc::clone(book));
        }

        self.misses += 1;
        tracing::debug!(path = %path.display(), "Scenario cache miss, resolving document");
        let book = Arc::new(ScenarioBook::parse(&content, format, current_price)?);

        // Keep the unpriced entry and the latest priced one for the current content
        self.entries.retain(|k, _| {
            k.path != key.path
                || (k.content_hash == key.content_hash && k.current_price.is_none())
        });
        self.entries.insert(key, Arc::clone(&book));
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
