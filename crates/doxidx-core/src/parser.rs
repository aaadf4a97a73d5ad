//! Search-table parser - parses the generated `searchData` literal
//!
//! Parsing happens in two steps: the token stream is first built into a
//! generic value tree (strings, integers, arrays), then the tree is
//! interpreted as index records. Bracket/lexical damage surfaces as
//! `ParseError`; a tree that parses but does not have the record shape
//! surfaces as `MalformedEntry`.

use crate::entry::{IndexEntry, Occurrence, SymbolKind};
use crate::error::IndexError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::normalize;
use thiserror::Error;

/// Value tree for one table file
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Array(Vec<Value>),
}

impl Value {
    fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected token at line {line}, column {column}: expected {expected}, got {got:?}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: String,
        got: TokenKind,
    },
    #[error("unexpected end of input")]
    UnexpectedEof,
}

pub struct TableParser {
    tokens: Vec<Token>,
    position: usize,
}

impl TableParser {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize();
        Self { tokens, position: 0 }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                line: token.line,
                column: token.column,
                expected: expected.to_string(),
                got: token.kind.clone(),
            },
            None => ParseError::UnexpectedEof,
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        match self.current() {
            Some(token) if &token.kind == kind => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Parse the whole file: optional `var searchData=` header, the record
    /// array, optional trailing semicolon.
    pub fn parse(&mut self) -> Result<Vec<Value>, ParseError> {
        if let Some(token) = self.current() {
            if matches!(&token.kind, TokenKind::Identifier(name) if name == "var") {
                self.advance();
                match self.current() {
                    Some(token) if matches!(&token.kind, TokenKind::Identifier(_)) => self.advance(),
                    _ => return Err(self.unexpected("variable name")),
                }
                self.expect(&TokenKind::Equals, "'='")?;
            }
        }

        let records = self.parse_array()?;

        if let Some(token) = self.current() {
            if matches!(token.kind, TokenKind::Semicolon) {
                self.advance();
            }
        }
        self.expect(&TokenKind::Eof, "end of input")?;

        Ok(records)
    }

    fn parse_array(&mut self) -> Result<Vec<Value>, ParseError> {
        self.expect(&TokenKind::LeftBracket, "'['")?;

        let mut items = Vec::new();
        loop {
            match self.current() {
                Some(token) if matches!(token.kind, TokenKind::RightBracket) => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    match self.current() {
                        Some(token) if matches!(token.kind, TokenKind::Comma) => self.advance(),
                        Some(token) if matches!(token.kind, TokenKind::RightBracket) => {}
                        _ => return Err(self.unexpected("',' or ']'")),
                    }
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }

        Ok(items)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.current() {
            Some(token) => match &token.kind {
                TokenKind::String(s) => {
                    let value = Value::String(s.clone());
                    self.advance();
                    Ok(value)
                }
                TokenKind::Integer(n) => {
                    let value = Value::Integer(*n);
                    self.advance();
                    Ok(value)
                }
                TokenKind::LeftBracket => Ok(Value::Array(self.parse_array()?)),
                _ => Err(self.unexpected("string, number or '['")),
            },
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

/// Parse one table file into index entries.
///
/// The `kind` is supplied by the caller (derived from the file name); the
/// table text itself does not carry it.
pub fn parse_table(input: &str, kind: SymbolKind) -> Result<Vec<IndexEntry>, IndexError> {
    let mut parser = TableParser::new(input);
    let records = parser.parse().map_err(IndexError::from)?;

    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        entries.push(interpret_record(index, record, kind)?);
    }
    Ok(entries)
}

/// Interpret one `['rawKey',['Display',[anchor,flag,'context'],...]]` record
fn interpret_record(index: usize, record: &Value, kind: SymbolKind) -> Result<IndexEntry, IndexError> {
    let malformed = |reason: String| IndexError::MalformedEntry { index, reason };

    let fields = record
        .as_array()
        .ok_or_else(|| malformed("record is not an array".to_string()))?;

    let raw_key = fields
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("record has no key string".to_string()))?;

    // The raw key carries a numeric id suffix; strip it for diagnostics.
    // The display name is authoritative for key derivation.
    let key_hint = normalize::strip_id_suffix(raw_key);

    let payload = fields
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(format!("entry '{}' has no payload array", key_hint)))?;

    let display_name = payload
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("entry '{}' has no display name", key_hint)))?;
    if display_name.is_empty() {
        return Err(malformed(format!("entry '{}' has an empty display name", key_hint)));
    }

    let mut occurrences = Vec::with_capacity(payload.len().saturating_sub(1));
    for item in &payload[1..] {
        occurrences.push(interpret_occurrence(index, key_hint, item)?);
    }
    if occurrences.is_empty() {
        return Err(malformed(format!("entry '{}' has no occurrences", key_hint)));
    }

    Ok(IndexEntry::new(
        normalize::decode_entities(display_name),
        kind,
        occurrences,
    ))
}

/// Interpret one `[anchor, flag, 'context']` occurrence array
fn interpret_occurrence(index: usize, key_hint: &str, item: &Value) -> Result<Occurrence, IndexError> {
    let malformed = |reason: String| IndexError::MalformedEntry { index, reason };

    let parts = item.as_array().ok_or_else(|| {
        malformed(format!("entry '{}': occurrence is not an array", key_hint))
    })?;
    if parts.len() != 3 {
        return Err(malformed(format!(
            "entry '{}': occurrence has {} element(s), expected 3",
            key_hint,
            parts.len()
        )));
    }

    let anchor = parts[0].as_str().ok_or_else(|| {
        malformed(format!("entry '{}': occurrence anchor is not a string", key_hint))
    })?;
    if anchor.is_empty() {
        return Err(malformed(format!("entry '{}': occurrence anchor is empty", key_hint)));
    }

    // Middle element is a frame-targeting flag for the HTML viewer; it must
    // be numeric but its value is not meaningful here.
    if !matches!(parts[1], Value::Integer(_)) {
        return Err(malformed(format!(
            "entry '{}': occurrence flag is not a number",
            key_hint
        )));
    }

    let context = parts[2].as_str().ok_or_else(|| {
        malformed(format!("entry '{}': occurrence context is not a string", key_hint))
    })?;

    let decoded = normalize::decode_entities(context);
    let (scope, source) = normalize::split_context(&decoded);

    let mut occurrence = Occurrence::new(anchor, scope);
    if let Some(source) = source {
        occurrence = occurrence.with_source(source);
    }
    Ok(occurrence)
}
