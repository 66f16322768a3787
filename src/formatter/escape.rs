//! The five predefined XML entities and numeric character references

use std::borrow::Cow;

const ENTITIES: [(char, &str); 5] = [
    ('"', "&quot;"),
    ('\'', "&apos;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('&', "&amp;"),
];

/// Backslash written as a character reference
const BACKSLASH_REFERENCE: &str = "&#92;";

fn entity_for(c: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(special, _)| *special == c)
        .map(|(_, entity)| *entity)
}

/// Replace `" ' < > &` with their entities. Borrows when nothing changes.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| entity_for(c).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match entity_for(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escape an attribute value for a double-quoted literal.
///
/// A trailing `\` would escape the closing quote, so it is written as a
/// character reference.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.ends_with('\\') {
        return escaped;
    }
    let mut owned = escaped.into_owned();
    owned.pop();
    owned.push_str(BACKSLASH_REFERENCE);
    Cow::Owned(owned)
}

/// Decode the five entities and `&#N;` / `&#xH;` references; any other
/// `&...;` sequence is left as written.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        plain.push_str(rest.get(..amp).unwrap_or_default());
        let tail = rest.get(amp..).unwrap_or_default();
        match ENTITIES
            .iter()
            .find(|(_, entity)| tail.starts_with(entity))
        {
            Some((c, entity)) => {
                plain.push(*c);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => match char_reference(tail) {
                Some((c, len)) => {
                    plain.push(c);
                    rest = tail.get(len..).unwrap_or_default();
                }
                None => {
                    plain.push('&');
                    rest = tail.get(1..).unwrap_or_default();
                }
            },
        }
    }
    plain.push_str(rest);
    Cow::Owned(plain)
}

/// Character and byte length of a `&#...;` reference at the start of `tail`
fn char_reference(tail: &str) -> Option<(char, usize)> {
    let body = tail.strip_prefix("&#")?;
    let end = body.find(';')?;
    let digits = body.get(..end)?;
    let code = match digits.strip_prefix(|c| matches!(c, 'x' | 'X')) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse().ok()?
        }
        None => return None,
    };
    Some((char::from_u32(code)?, end + 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_borrows_plain_text() {
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
        assert!(matches!(unescape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape("&lt;&amp;lt;&copy; & x"), "<&lt;&copy; & x");
    }

    #[test]
    fn test_unescape_character_references() {
        assert_eq!(unescape("&#92;&#x41;&#X62;"), "\\Ab");
        assert_eq!(unescape("&#;&#x;&#12a;&#xD800;"), "&#;&#x;&#12a;&#xD800;");
        assert_eq!(unescape("&amp;#92;"), "&#92;");
    }

    #[test]
    fn test_escape_attribute_trailing_backslash() {
        assert_eq!(escape_attribute("C:\\dir\\"), "C:\\dir&#92;");
        assert_eq!(escape_attribute("say \"it's\""), "say &quot;it&apos;s&quot;");
        assert!(matches!(escape_attribute("a\\b"), Cow::Borrowed("a\\b")));
        let value = "x\\ & \"y\"\\";
        assert_eq!(unescape(&escape_attribute(value)), value);
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let text = "if a < b && c > 'd' then \"e\"";
        assert_eq!(unescape(&escape(text)), text);
    }
}
