//! Parse cache for doxidx to skip re-parsing unchanged tables
//!
//! Uses xxHash for fast content hashing and stores the parsed entries in a
//! `.doxidx-cache` file, so repeated queries over a large unchanged
//! documentation tree go straight to the index.

use anyhow::{Context, Result};
use doxidx_core::{IndexEntry, SymbolKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Cache file name
const CACHE_FILE: &str = ".doxidx-cache";

/// Cache version - increment when format changes
const CACHE_VERSION: u32 = 1;

/// Entry for a single cached table file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// xxHash of the table file contents
    pub content_hash: u64,
    /// Kind derived from the file name at parse time
    pub kind: SymbolKind,
    /// The parsed index entries
    pub entries: Vec<IndexEntry>,
}

/// Cache structure stored on disk
#[derive(Debug, Serialize, Deserialize)]
pub struct Cache {
    /// Cache format version
    pub version: u32,
    /// Cached tables by path
    pub tables: HashMap<PathBuf, CacheEntry>,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            tables: HashMap::new(),
        }
    }
}

impl Cache {
    /// Load cache from the default location in the given directory
    pub fn load(dir: &Path) -> Result<Self> {
        let cache_path = dir.join(CACHE_FILE);
        Self::load_from(&cache_path)
    }

    /// Load cache from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;

        let cache: Self = match serde_json::from_str(&contents) {
            Ok(cache) => cache,
            // A corrupt cache is not an error, just a miss
            Err(_) => return Ok(Self::default()),
        };

        // Check version compatibility
        if cache.version != CACHE_VERSION {
            return Ok(Self::default());
        }

        Ok(cache)
    }

    /// Save cache to the default location in the given directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        let cache_path = dir.join(CACHE_FILE);
        self.save_to(&cache_path)
    }

    /// Save cache to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string(self).context("Failed to serialize cache")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;

        Ok(())
    }

    /// Get cached entries for a table if still valid
    pub fn get_if_valid(&self, path: &Path, current_hash: u64, kind: SymbolKind) -> Option<&CacheEntry> {
        self.tables
            .get(path)
            .filter(|entry| entry.content_hash == current_hash && entry.kind == kind)
    }

    /// Update cache entry for a table
    pub fn update(&mut self, path: PathBuf, content_hash: u64, kind: SymbolKind, entries: Vec<IndexEntry>) {
        self.tables.insert(
            path,
            CacheEntry {
                content_hash,
                kind,
                entries,
            },
        );
    }

    /// Remove entries for tables that no longer exist
    pub fn prune(&mut self) {
        self.tables.retain(|path, _| path.exists());
    }

    /// Get number of cached tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Hash table contents using xxHash (very fast)
pub fn hash_content(contents: &str) -> u64 {
    xxh3_64(contents.as_bytes())
}

/// Delete the cache file in the given directory
pub fn clear_cache(dir: &Path) -> Result<()> {
    let cache_path = dir.join(CACHE_FILE);
    if cache_path.exists() {
        fs::remove_file(&cache_path)
            .with_context(|| format!("Failed to delete cache file: {}", cache_path.display()))?;
    }
    Ok(())
}
