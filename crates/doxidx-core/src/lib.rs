//! doxidx-core: parsing and querying of generated documentation search tables
//!
//! This crate provides:
//! - `SymbolIndex`: the in-memory index with `load`, `query` and `stats`
//! - `IndexEntry` / `Occurrence`: immutable records for one indexed symbol,
//!   with `resolve()` from occurrence index to anchor
//! - `SymbolKind`: the table taxonomy derived from search-table file names
//! - `search_key()`: the normalization applied to names and queries alike

mod entry;
mod error;
mod index;
mod lexer;
mod parser;
pub mod normalize;

pub use entry::{IndexEntry, Occurrence, SymbolKind};
pub use error::IndexError;
pub use index::{IndexStats, Query, SymbolIndex};
pub use normalize::search_key;
pub use parser::{parse_table, ParseError};
