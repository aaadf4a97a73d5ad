//! Name normalization and entity decoding for search tables
//!
//! The generator lowercases every symbol name and escapes anything that is
//! not an ASCII alphanumeric as `_` followed by the two-digit lowercase hex
//! code of the character, so `ned2DeltaLla_d` indexes as `ned2deltalla_5fd`.
//! Queries go through the same derivation, which is what makes substring
//! matching case-insensitive and punctuation-tolerant.

/// No-break space, used by the generator to separate a signature from its
/// source-file label inside occurrence context strings.
pub const NBSP: char = '\u{a0}';

/// Derive the search key for a symbol name.
pub fn search_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.chars() {
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                key.push(lower);
            } else {
                key.push('_');
                key.push_str(&format!("{:02x}", lower as u32));
            }
        }
    }
    key
}

/// Strip the numeric id suffix the generator appends to raw table keys
/// (`nextsibling_4453` -> `nextsibling`). Returns the input unchanged when
/// no suffix is present.
pub fn strip_id_suffix(raw_key: &str) -> &str {
    if let Some(pos) = raw_key.rfind('_') {
        let tail = &raw_key[pos + 1..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            return &raw_key[..pos];
        }
    }
    raw_key
}

/// Decode the HTML entities that occur in generated context strings.
///
/// Handles the named entities `&amp;` `&lt;` `&gt;` `&quot;` `&apos;` plus
/// decimal (`&#160;`) and hex (`&#xa0;`) character references. Anything
/// unrecognized is left as-is.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_one(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode a single entity at the start of `tail` (which begins with `&`).
/// Returns the decoded char and the number of bytes consumed.
fn decode_one(tail: &str) -> Option<(char, usize)> {
    let semi = tail.find(';')?;
    if semi < 2 || semi > 10 {
        return None;
    }

    let body = &tail[1..semi];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };

    Some((ch, semi + 1))
}

/// Split a decoded occurrence context into scope text and optional
/// source-file label. The generator joins them with `:` + no-break space.
pub fn split_context(context: &str) -> (String, Option<String>) {
    match context.split_once(":\u{a0}") {
        Some((scope, source)) => (scope.to_string(), Some(source.trim().to_string())),
        None => (context.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_plain() {
        assert_eq!(search_key("NextSibling"), "nextsibling");
        assert_eq!(search_key("nextsibling"), "nextsibling");
    }

    #[test]
    fn test_search_key_underscore() {
        assert_eq!(search_key("ned2DeltaLla_d"), "ned2deltalla_5fd");
    }

    #[test]
    fn test_search_key_punctuation() {
        assert_eq!(search_key("TiXmlNode::NextSibling"), "tixmlnode_3a_3anextsibling");
        assert_eq!(search_key("operator=="), "operator_3d_3d");
    }

    #[test]
    fn test_search_key_empty() {
        assert_eq!(search_key(""), "");
    }

    #[test]
    fn test_strip_id_suffix() {
        assert_eq!(strip_id_suffix("nextsibling_4453"), "nextsibling");
        assert_eq!(strip_id_suffix("ned2deltalla_5fd_4444"), "ned2deltalla_5fd");
        // `_5f` is an escape, not an id
        assert_eq!(strip_id_suffix("ned2deltalla_5fd"), "ned2deltalla_5fd");
        assert_eq!(strip_id_suffix("plain"), "plain");
    }

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;T&gt;"), "<T>");
        assert_eq!(decode_entities("const std::string &amp;_value"), "const std::string &_value");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("sig:&#160;File.c"), format!("sig:{}File.c", NBSP));
        assert_eq!(decode_entities("&#x41;"), "A");
    }

    #[test]
    fn test_decode_leaves_unknown_alone() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&nosuch;"), "&nosuch;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_split_context_with_source() {
        let decoded = decode_entities("ned2lla(ixVector3 ned):&#160;ISEarth.c");
        let (scope, source) = split_context(&decoded);
        assert_eq!(scope, "ned2lla(ixVector3 ned)");
        assert_eq!(source, Some("ISEarth.c".to_string()));
    }

    #[test]
    fn test_split_context_member() {
        let (scope, source) = split_context("TiXmlAttribute");
        assert_eq!(scope, "TiXmlAttribute");
        assert_eq!(source, None);
    }

    #[test]
    fn test_split_context_double_colon_untouched() {
        let (scope, source) = split_context("TiXmlNode::NextSibling() const");
        assert_eq!(scope, "TiXmlNode::NextSibling() const");
        assert_eq!(source, None);
    }
}
