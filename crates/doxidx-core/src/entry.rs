//! Index entry types for the symbol search index

use crate::error::IndexError;
use crate::normalize;
use serde::{Deserialize, Serialize};

/// Symbol kind, derived from the search-table file stem
/// (`functions_c.js` -> `Functions`, `all_0.js` -> `All`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    All,
    Classes,
    Defines,
    Enums,
    EnumValues,
    Files,
    Functions,
    Groups,
    Namespaces,
    Pages,
    Properties,
    Related,
    Typedefs,
    Variables,
}

impl SymbolKind {
    /// Every kind, in display order
    pub const ALL: [SymbolKind; 14] = [
        SymbolKind::All,
        SymbolKind::Classes,
        SymbolKind::Defines,
        SymbolKind::Enums,
        SymbolKind::EnumValues,
        SymbolKind::Files,
        SymbolKind::Functions,
        SymbolKind::Groups,
        SymbolKind::Namespaces,
        SymbolKind::Pages,
        SymbolKind::Properties,
        SymbolKind::Related,
        SymbolKind::Typedefs,
        SymbolKind::Variables,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::All => "all",
            SymbolKind::Classes => "classes",
            SymbolKind::Defines => "defines",
            SymbolKind::Enums => "enums",
            SymbolKind::EnumValues => "enumvalues",
            SymbolKind::Files => "files",
            SymbolKind::Functions => "functions",
            SymbolKind::Groups => "groups",
            SymbolKind::Namespaces => "namespaces",
            SymbolKind::Pages => "pages",
            SymbolKind::Properties => "properties",
            SymbolKind::Related => "related",
            SymbolKind::Typedefs => "typedefs",
            SymbolKind::Variables => "variables",
        }
    }

    /// Parse a kind name (as used in config files and `--kind` flags)
    pub fn from_name(name: &str) -> Option<SymbolKind> {
        let name = name.to_lowercase();
        SymbolKind::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Derive the kind from a table file stem such as `functions_c` or
    /// `all_0`. The part before the first underscore names the kind.
    pub fn from_file_stem(stem: &str) -> Option<SymbolKind> {
        let base = stem.split('_').next().unwrap_or(stem);
        SymbolKind::from_name(base)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented appearance of a symbol (e.g. declaration vs. definition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Opaque anchor: relative page URL plus fragment
    pub anchor: String,
    /// Containing entity as authored (class name or full signature)
    pub scope: String,
    /// Source-file label, when the generator appended one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Occurrence {
    pub fn new(anchor: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            scope: scope.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A symbol with every place it is documented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Normalized search key, derived from `display_name`
    pub key: String,
    /// Symbol name as authored
    pub display_name: String,
    /// Which table family the entry came from
    pub kind: SymbolKind,
    /// Ordered, non-empty list of documented appearances
    pub occurrences: Vec<Occurrence>,
}

impl IndexEntry {
    /// Build an entry, deriving the key from the display name
    pub fn new(display_name: impl Into<String>, kind: SymbolKind, occurrences: Vec<Occurrence>) -> Self {
        let display_name = display_name.into();
        Self {
            key: normalize::search_key(&display_name),
            display_name,
            kind,
            occurrences,
        }
    }

    /// Resolve an occurrence to its anchor
    pub fn resolve(&self, occurrence_index: usize) -> Result<&str, IndexError> {
        self.occurrences
            .get(occurrence_index)
            .map(|o| o.anchor.as_str())
            .ok_or_else(|| IndexError::IndexOutOfRange {
                display_name: self.display_name.clone(),
                requested: occurrence_index,
                available: self.occurrences.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(SymbolKind::from_name("functions"), Some(SymbolKind::Functions));
        assert_eq!(SymbolKind::from_name("FUNCTIONS"), Some(SymbolKind::Functions));
        assert_eq!(SymbolKind::from_name("enumvalues"), Some(SymbolKind::EnumValues));
        assert_eq!(SymbolKind::from_name("bogus"), None);
    }

    #[test]
    fn test_kind_from_file_stem() {
        assert_eq!(SymbolKind::from_file_stem("functions_c"), Some(SymbolKind::Functions));
        assert_eq!(SymbolKind::from_file_stem("all_0"), Some(SymbolKind::All));
        assert_eq!(SymbolKind::from_file_stem("variables_a"), Some(SymbolKind::Variables));
        assert_eq!(SymbolKind::from_file_stem("searchdata"), None);
        assert_eq!(SymbolKind::from_file_stem("nomatches"), None);
    }

    #[test]
    fn test_entry_derives_key() {
        let entry = IndexEntry::new(
            "ned2DeltaLla_d",
            SymbolKind::Functions,
            vec![Occurrence::new("../f.html#a1", "ned2DeltaLla_d(ixVector3 ned)")],
        );
        assert_eq!(entry.key, "ned2deltalla_5fd");
    }

    #[test]
    fn test_resolve_in_range() {
        let entry = IndexEntry::new(
            "NextSibling",
            SymbolKind::Functions,
            vec![
                Occurrence::new("../node.html#a1", "XmlNode"),
                Occurrence::new("../node.html#a2", "XmlNode"),
            ],
        );
        assert_eq!(entry.resolve(0).unwrap(), "../node.html#a1");
        assert_eq!(entry.resolve(1).unwrap(), "../node.html#a2");
    }

    #[test]
    fn test_resolve_out_of_range() {
        let entry = IndexEntry::new(
            "NextSibling",
            SymbolKind::Functions,
            vec![Occurrence::new("../node.html#a1", "XmlNode")],
        );
        let err = entry.resolve(2).unwrap_err();
        assert!(matches!(
            err,
            IndexError::IndexOutOfRange { requested: 2, available: 1, .. }
        ));
    }

    #[test]
    fn test_occurrence_with_source() {
        let occ = Occurrence::new("../e.html#a1", "ned2lla(ixVector3 ned)").with_source("ISEarth.c");
        assert_eq!(occ.source.as_deref(), Some("ISEarth.c"));
    }
}
