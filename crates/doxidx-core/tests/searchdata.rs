//! End-to-end: parse realistic generated tables, merge, query, resolve

use doxidx_core::{IndexError, SymbolIndex, SymbolKind};

// Shaped like a real generated functions table: id-suffixed keys, entity
// escapes, declaration/definition occurrence pairs, member occurrences.
const FUNCTIONS_N: &str = r#"var searchData=
[
  ['name_4441',['Name',['../class_xml_attribute.html#a008ef948268ee752b58c60d63d84bb01',1,'XmlAttribute']]],
  ['ned2deltalla_4443',['ned2DeltaLla',['../_earth_8c.html#a60ed4d1eac433f88a37b763ffed6f466',1,'ned2DeltaLla(ixVector3 ned, ixVector3 llaRef):&#160;Earth.c'],['../_earth_8h.html#a60ed4d1eac433f88a37b763ffed6f466',1,'ned2DeltaLla(ixVector3 ned, ixVector3 llaRef):&#160;Earth.c']]],
  ['ned2deltalla_5fd_4444',['ned2DeltaLla_d',['../_earth_8c.html#a09aa9dec01d672acae1f2fb645e87466',1,'ned2DeltaLla_d(ixVector3 ned, double llaRef[3]):&#160;Earth.c'],['../_earth_8h.html#a09aa9dec01d672acae1f2fb645e87466',1,'ned2DeltaLla_d(ixVector3 ned, double llaRef[3]):&#160;Earth.c']]],
  ['nextsibling_4453',['NextSibling',['../class_xml_node.html#a5f0bf3809d4a35456d28cc9522c26245',1,'XmlNode::NextSibling(const std::string &amp;_value) const'],['../class_xml_node.html#a4d05f7b1d7b470ac6887edd072d4892a',1,'XmlNode::NextSibling()']]],
  ['nochildren_4455',['NoChildren',['../class_xml_node.html#abe85e0ec04ea59c033f324c8504653e5',1,'XmlNode']]]
];
"#;

const CLASSES_X: &str = r#"var searchData=
[
  ['xmlattribute_102',['XmlAttribute',['../class_xml_attribute.html',1,'']]],
  ['xmlnode_103',['XmlNode',['../class_xml_node.html',1,'']]]
];
"#;

fn build() -> SymbolIndex {
    let mut index = SymbolIndex::load(FUNCTIONS_N, SymbolKind::Functions).unwrap();
    index
        .push_table(CLASSES_X, SymbolKind::Classes)
        .unwrap();
    index
}

#[test]
fn empty_query_yields_every_entry_once_in_order() {
    let index = build();
    let names: Vec<_> = index.query("").map(|e| e.display_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Name",
            "ned2DeltaLla",
            "ned2DeltaLla_d",
            "NextSibling",
            "NoChildren",
            "XmlAttribute",
            "XmlNode",
        ]
    );
}

#[test]
fn query_matches_case_insensitively() {
    let index = build();
    let upper: Vec<_> = index.query("NED2DELTALLA").map(|e| e.key.clone()).collect();
    let lower: Vec<_> = index.query("ned2deltalla").map(|e| e.key.clone()).collect();
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 2);
}

#[test]
fn query_is_tolerant_of_punctuation() {
    let index = build();
    // The underscore escapes identically in key and query
    let hits: Vec<_> = index
        .query("deltalla_d")
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(hits, vec!["ned2DeltaLla_d"]);
}

#[test]
fn declaration_and_definition_resolve_to_distinct_pages() {
    let index = build();
    let entry = index.query("ned2deltalla").next().unwrap();
    assert_eq!(entry.occurrences.len(), 2);

    let definition = entry.resolve(0).unwrap();
    let declaration = entry.resolve(1).unwrap();
    assert!(definition.starts_with("../_earth_8c.html#"));
    assert!(declaration.starts_with("../_earth_8h.html#"));

    assert!(matches!(
        entry.resolve(2),
        Err(IndexError::IndexOutOfRange { requested: 2, available: 2, .. })
    ));
}

#[test]
fn member_occurrences_carry_scope_not_source() {
    let index = build();
    let entry = index.query("nochildren").next().unwrap();
    assert_eq!(entry.occurrences[0].scope, "XmlNode");
    assert_eq!(entry.occurrences[0].source, None);
}

#[test]
fn function_occurrences_split_signature_from_source_label() {
    let index = build();
    let entry = index.query("ned2deltalla").next().unwrap();
    assert_eq!(
        entry.occurrences[0].scope,
        "ned2DeltaLla(ixVector3 ned, ixVector3 llaRef)"
    );
    assert_eq!(entry.occurrences[0].source.as_deref(), Some("Earth.c"));
}

#[test]
fn entities_are_decoded_in_signatures() {
    let index = build();
    let entry = index.query("nextsibling").next().unwrap();
    assert_eq!(
        entry.occurrences[0].scope,
        "XmlNode::NextSibling(const std::string &_value) const"
    );
}

#[test]
fn kind_filter_separates_tables() {
    let index = build();
    let classes: Vec<_> = index
        .query_kinds("xml", &[SymbolKind::Classes])
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(classes, vec!["XmlAttribute", "XmlNode"]);
}

#[test]
fn stats_count_entries_and_occurrences() {
    let index = build();
    let stats = index.stats();
    assert_eq!(stats.entries, 7);
    assert_eq!(stats.occurrences, 10);
    assert_eq!(
        stats.by_kind,
        vec![(SymbolKind::Classes, 2), (SymbolKind::Functions, 5)]
    );
}
