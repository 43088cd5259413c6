//! Text decoding: raw bytes to UTF-8 and HTML entities in rentry textarea
//! content.
//!
//! Rentry escapes the markdown it places in the edit page's `<textarea>`.
//! Decoding runs in three passes: the fixed set of named entities rentry
//! emits, then hexadecimal `&#xHH;`, then decimal `&#NNN;` references.
//! Because named entities go first, `&amp;#62;` ends up as `>`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static NAMED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:amp|lt|gt|quot|#x27|#39|#x2F|apos|nbsp);").expect("invalid entity regex")
});

static HEX_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#x([0-9a-fA-F]+);").expect("invalid hex entity regex"));

static DEC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([0-9]+);").expect("invalid decimal entity regex"));

/// Decode the HTML entities rentry uses back to plain characters.
///
/// Unknown named entities and numeric references that are not valid
/// Unicode scalar values are left as they are.
#[must_use]
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }

    let named = NAMED_ENTITY.replace_all(text, |caps: &Captures| {
        named_entity(&caps[0]).map_or_else(|| caps[0].to_owned(), String::from)
    });
    let hex = HEX_ENTITY.replace_all(&named, |caps: &Captures| {
        numeric_entity(&caps[0], u32::from_str_radix(&caps[1], 16).ok())
    });
    DEC_ENTITY
        .replace_all(&hex, |caps: &Captures| {
            numeric_entity(&caps[0], caps[1].parse().ok())
        })
        .into_owned()
}

fn named_entity(entity: &str) -> Option<&'static str> {
    Some(match entity {
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&quot;" => "\"",
        "&#x27;" | "&#39;" | "&apos;" => "'",
        "&#x2F;" => "/",
        "&nbsp;" => " ",
        _ => return None,
    })
}

fn numeric_entity(original: &str, code: Option<u32>) -> String {
    code.and_then(char::from_u32)
        .map_or_else(|| original.to_owned(), String::from)
}

/// Decode UTF-8, replacing invalid sequences with U+FFFD.
pub(crate) fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_named_entities() {
        assert_eq!(
            decode_html_entities("&lt;b&gt; &quot;x&quot; &#x27;y&#39; &apos;z&apos;"),
            "<b> \"x\" 'y' 'z'"
        );
        assert_eq!(decode_html_entities("a&#x2F;b"), "a/b");
        assert_eq!(decode_html_entities("a&nbsp;b"), "a b");
    }

    #[test]
    fn test_mixed_named_and_numeric() {
        assert_eq!(decode_html_entities("A &amp; B &#62; C"), "A & B > C");
    }

    #[test]
    fn test_hex_and_decimal() {
        assert_eq!(decode_html_entities("&#x41;&#66;&#x1F600;"), "AB\u{1F600}");
        assert_eq!(decode_html_entities("&#xe9;t&#233;"), "été");
    }

    #[test]
    fn test_named_pass_runs_before_numeric() {
        assert_eq!(decode_html_entities("&amp;#62;"), ">");
    }

    #[test]
    fn test_unknown_named_entity_preserved() {
        assert_eq!(decode_html_entities("&copy; &foo;"), "&copy; &foo;");
    }

    #[test]
    fn test_invalid_code_points_preserved() {
        assert_eq!(decode_html_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_html_entities("&#99999999999;"), "&#99999999999;");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = "!!! note Nothing to decode here & there";
        assert_eq!(decode_html_entities(text), text);
        assert_eq!(decode_html_entities(&decode_html_entities(text)), text);
    }

    #[test]
    fn test_decode_lossy_replaces_invalid_bytes() {
        assert_eq!(decode_lossy(b"Caf\xc3\xa9"), "Caf\u{e9}");
        assert_eq!(decode_lossy(b"Caf\xe9 menu"), "Caf\u{FFFD} menu");
    }
}
