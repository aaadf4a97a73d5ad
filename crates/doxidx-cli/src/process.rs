//! Table discovery and loading for doxidx

use anyhow::{Context, Result};
use doxidx_core::{parse_table, IndexEntry, SymbolKind};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::cache::{hash_content, Cache};
use crate::config::Config;

/// A discovered search-table file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    pub path: PathBuf,
    pub kind: SymbolKind,
}

/// A table after parsing (or a cache hit)
#[derive(Debug)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub kind: SymbolKind,
    pub entries: Vec<IndexEntry>,
    pub content_hash: u64,
    pub from_cache: bool,
}

/// Collect table files from the given paths.
///
/// Files are taken as-is (kind from the file stem, falling back to `all`
/// for unrecognized stems); directories are walked recursively for `.js`
/// files whose stem names a known kind. Returns the discovered tables in
/// deterministic path order plus any paths that did not exist.
pub fn find_tables(paths: &[PathBuf], config: &Config) -> (Vec<TableFile>, Vec<PathBuf>) {
    let mut tables: Vec<TableFile> = Vec::new();
    let mut missing: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_file() {
            let kind = stem_kind(path).unwrap_or(SymbolKind::All);
            tables.push(TableFile {
                path: path.clone(),
                kind,
            });
        } else if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "js"))
            {
                let file_path = entry.path();
                if config.should_exclude(file_path) {
                    continue;
                }
                if let Some(kind) = stem_kind(file_path) {
                    tables.push(TableFile {
                        path: file_path.to_path_buf(),
                        kind,
                    });
                }
            }
        } else {
            missing.push(path.clone());
        }
    }

    tables.sort_by(|a, b| a.path.cmp(&b.path));
    tables.dedup();
    (tables, missing)
}

fn stem_kind(path: &Path) -> Option<SymbolKind> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(SymbolKind::from_file_stem)
}

/// Parse one table file, consulting the cache first
pub fn load_table(table: &TableFile, cache: Option<&Cache>) -> Result<LoadedTable> {
    let contents = std::fs::read_to_string(&table.path)
        .with_context(|| format!("Failed to read table: {}", table.path.display()))?;
    let content_hash = hash_content(&contents);

    if let Some(cache) = cache {
        if let Some(hit) = cache.get_if_valid(&table.path, content_hash, table.kind) {
            return Ok(LoadedTable {
                path: table.path.clone(),
                kind: table.kind,
                entries: hit.entries.clone(),
                content_hash,
                from_cache: true,
            });
        }
    }

    let entries = parse_table(&contents, table.kind)
        .with_context(|| format!("Failed to parse table: {}", table.path.display()))?;

    Ok(LoadedTable {
        path: table.path.clone(),
        kind: table.kind,
        entries,
        content_hash,
        from_cache: false,
    })
}

/// Parse all tables in parallel, preserving the input order in the result
pub fn load_tables(
    tables: &[TableFile],
    cache: Option<&Cache>,
    show_progress: bool,
) -> Vec<Result<LoadedTable>> {
    let progress = if show_progress && tables.len() > 1 {
        let bar = ProgressBar::new(tables.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} tables")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let results: Vec<Result<LoadedTable>> = tables
        .par_iter()
        .map(|table| {
            let result = load_table(table, cache);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            result
        })
        .collect();

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    results
}
