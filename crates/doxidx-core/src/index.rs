//! The in-memory symbol index
//!
//! Entries live in a flat vector in table order, which is what gives
//! `query` its insertion-order guarantee. The index is built wholesale from
//! one or more tables and exposes no mutation afterwards; concurrent reads
//! need no locking.

use crate::entry::{IndexEntry, SymbolKind};
use crate::error::IndexError;
use crate::normalize;
use crate::parser;

/// Symbol index over one or more loaded search tables
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: Vec<IndexEntry>,
}

impl SymbolIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single table into a fresh index
    pub fn load(table: &str, kind: SymbolKind) -> Result<Self, IndexError> {
        Ok(Self {
            entries: parser::parse_table(table, kind)?,
        })
    }

    /// Append another table, preserving the order entries arrive in
    pub fn push_table(&mut self, table: &str, kind: SymbolKind) -> Result<usize, IndexError> {
        let parsed = parser::parse_table(table, kind)?;
        let count = parsed.len();
        self.entries.extend(parsed);
        Ok(count)
    }

    /// Append already-parsed entries
    pub fn push_entries(&mut self, entries: Vec<IndexEntry>) {
        self.entries.extend(entries);
    }

    /// Merge another index into this one
    pub fn merge(&mut self, other: SymbolIndex) {
        self.entries.extend(other.entries);
    }

    /// All entries, in insertion order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Query entries whose key contains the normalized pattern.
    ///
    /// The returned iterator is lazy and restartable: calling `query` again
    /// with the same pattern walks the same sequence. An empty pattern
    /// matches every entry.
    pub fn query<'a>(&'a self, pattern: &str) -> Query<'a> {
        Query {
            inner: self.entries.iter(),
            needle: normalize::search_key(pattern),
            kinds: None,
        }
    }

    /// Like [`query`](Self::query), restricted to the given kinds
    pub fn query_kinds<'a>(&'a self, pattern: &str, kinds: &[SymbolKind]) -> Query<'a> {
        Query {
            inner: self.entries.iter(),
            needle: normalize::search_key(pattern),
            kinds: Some(kinds.to_vec()),
        }
    }

    /// Per-kind totals for the loaded index
    pub fn stats(&self) -> IndexStats {
        let mut by_kind: Vec<(SymbolKind, usize)> = Vec::new();
        for kind in SymbolKind::ALL {
            let count = self.entries.iter().filter(|e| e.kind == kind).count();
            if count > 0 {
                by_kind.push((kind, count));
            }
        }

        IndexStats {
            entries: self.entries.len(),
            occurrences: self.entries.iter().map(|e| e.occurrences.len()).sum(),
            by_kind,
        }
    }
}

/// Lazy query iterator borrowed from a [`SymbolIndex`]
pub struct Query<'a> {
    inner: std::slice::Iter<'a, IndexEntry>,
    needle: String,
    kinds: Option<Vec<SymbolKind>>,
}

impl<'a> Iterator for Query<'a> {
    type Item = &'a IndexEntry;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.inner.by_ref() {
            if let Some(kinds) = &self.kinds {
                if !kinds.contains(&entry.kind) {
                    continue;
                }
            }
            if entry.key.contains(&self.needle) {
                return Some(entry);
            }
        }
        None
    }
}

/// Statistics about a loaded index
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub entries: usize,
    pub occurrences: usize,
    /// Entry counts per kind, zero-count kinds omitted
    pub by_kind: Vec<(SymbolKind, usize)>,
}
