//! `key="value"` pairs of a tag region

use crate::formatter::escape::unescape;
use crate::node::Attributes;

/// Bytes that end the attribute list when met between pairs
const STOPS: &[u8] = b">?!/<";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Searching,
    ReadingKey { start: usize },
    ReadingValue { key_start: usize, key_end: usize, quote: u8, start: usize },
}

/// Parse the pairs of a tag region that starts after the tag name.
///
/// Whitespace may separate pairs freely. A value runs to the first copy of
/// its opening quote that is not preceded by `\`, and entity references in it
/// are decoded. Keys without a quoted value
/// and a value cut off by the end of input are dropped. A repeated key keeps
/// its last value.
pub fn parse_attributes(region: &str) -> Attributes {
    let bytes = region.as_bytes();
    let mut attributes = Attributes::new();
    let mut state = State::Searching;
    let mut index = 0;

    while let Some(&b) = bytes.get(index) {
        state = match state {
            State::Searching if b.is_ascii_whitespace() => State::Searching,
            State::Searching if STOPS.contains(&b) => break,
            State::Searching => State::ReadingKey { start: index },
            State::ReadingKey { start } => match b {
                b'=' => match next_quote(bytes, index + 1) {
                    Some((quote_at, quote)) => {
                        index = quote_at;
                        State::ReadingValue {
                            key_start: start,
                            key_end: index_before_eq(bytes, start, quote_at),
                            quote,
                            start: quote_at + 1,
                        }
                    }
                    None => State::Searching,
                },
                _ if STOPS.contains(&b) => break,
                _ => State::ReadingKey { start },
            },
            State::ReadingValue {
                key_start,
                key_end,
                quote,
                start,
            } => {
                if b == quote && index.checked_sub(1).and_then(|i| bytes.get(i)) != Some(&b'\\') {
                    let key = key_word(region.get(key_start..key_end).unwrap_or_default());
                    if !key.is_empty() {
                        let value = region.get(start..index).unwrap_or_default();
                        attributes.insert(key.to_string(), unescape(value).into_owned());
                    }
                    State::Searching
                } else {
                    state
                }
            }
        };
        index += 1;
    }

    attributes
}

/// Position of the quote opening a value, skipping whitespace after `=`
fn next_quote(bytes: &[u8], from: usize) -> Option<(usize, u8)> {
    let offset = bytes
        .get(from..)?
        .iter()
        .position(|b| !b.is_ascii_whitespace())?;
    let at = from + offset;
    match bytes.get(at) {
        Some(&q @ (b'"' | b'\'')) => Some((at, q)),
        _ => None,
    }
}

/// End of the key: the `=` sign preceding the opening quote
fn index_before_eq(bytes: &[u8], start: usize, quote_at: usize) -> usize {
    bytes
        .get(start..quote_at)
        .and_then(|span| span.iter().rposition(|&b| b == b'='))
        .map_or(quote_at, |eq| start + eq)
}

/// A key is the last word before `=`; earlier words are valueless attributes.
fn key_word(raw: &str) -> &str {
    raw.split_whitespace().last().unwrap_or_default()
}
