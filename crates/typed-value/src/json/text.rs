//! Parsing JSON text into a document tree.

use std::borrow::Cow;

use serde_json::Value as JsonValue;

use super::JsonError;

/// Parses `src`, first replacing `\u` escapes of unpaired UTF-16 surrogates
/// with U+FFFD.
///
/// Such escapes are valid JSON text (the grammar does not pair surrogates)
/// and `JSON.stringify` emits them for strings holding a lone surrogate, but
/// a Rust string cannot hold one.
pub(crate) fn parse_document(src: &str) -> Result<JsonValue, JsonError> {
    Ok(serde_json::from_str(&replace_lone_surrogates(src))?)
}

fn replace_lone_surrogates(src: &str) -> Cow<'_, str> {
    let bytes = src.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let Some(unit) = escaped_unit(bytes, i) else {
            // Any other escape is two bytes long.
            i += 2;
            continue;
        };
        if is_high_surrogate(unit) && escaped_unit(bytes, i + 6).is_some_and(is_low_surrogate) {
            i += 12;
            continue;
        }
        if is_high_surrogate(unit) || is_low_surrogate(unit) {
            out.push_str(&src[copied..i]);
            out.push_str("\\ufffd");
            copied = i + 6;
        }
        i += 6;
    }

    if copied == 0 {
        return Cow::Borrowed(src);
    }
    out.push_str(&src[copied..]);
    Cow::Owned(out)
}

/// The code unit of a `\uXXXX` escape starting at `at`.
fn escaped_unit(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}
