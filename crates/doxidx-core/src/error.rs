//! Error taxonomy for index loading and lookup

use crate::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Structurally invalid record in an otherwise well-formed table.
    /// Loading aborts at the first one; no partial index is exposed.
    #[error("malformed entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    /// `resolve` was asked for an occurrence past the end of the list
    #[error("occurrence index {requested} is out of range for '{display_name}' ({available} occurrence(s))")]
    IndexOutOfRange {
        display_name: String,
        requested: usize,
        available: usize,
    },

    /// The table text did not lex/parse as a searchData literal
    #[error(transparent)]
    Parse(#[from] ParseError),
}
