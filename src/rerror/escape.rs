//! Escaping for Rerror string fields.
//!
//! Rerror strings are embedded between the quote delimiters of the canonical
//! encoding. Escaping guarantees that caller-supplied text can never close a
//! field early: `"` becomes `\"`, `\` becomes `\\`, and control characters
//! use their JSON escapes. The output is exactly the body of a JSON string
//! literal, so [`unescape`] can hand decoding to `serde_json`.
//!
//! # Example
//!
//! ```
//! use tpwire::rerror::{escape, unescape};
//!
//! let raw = r#"bad "input"\n"#;
//! let escaped = escape(raw);
//! assert_eq!(escaped, r#"bad \"input\"\\n"#);
//! assert_eq!(unescape(&escaped).unwrap(), raw);
//! ```

use std::borrow::Cow;

use crate::error::Result;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escape sequence for a byte, or `None` if it passes through unchanged.
#[inline]
fn escape_seq(b: u8) -> Option<&'static str> {
    match b {
        b'"' => Some("\\\""),
        b'\\' => Some("\\\\"),
        b'\x08' => Some("\\b"),
        b'\x0c' => Some("\\f"),
        b'\n' => Some("\\n"),
        b'\r' => Some("\\r"),
        b'\t' => Some("\\t"),
        _ => None,
    }
}

#[inline]
fn needs_escape(b: u8) -> bool {
    b < 0x20 || b == b'"' || b == b'\\'
}

/// Length of `s` after escaping.
pub fn escaped_len(s: &str) -> usize {
    s.bytes()
        .map(|b| match escape_seq(b) {
            Some(seq) => seq.len(),
            None if b < 0x20 => 6,
            None => 1,
        })
        .sum()
}

/// Append the escaped form of `s` to `out`.
///
/// Unescaped runs are copied in one go; only ASCII bytes are ever escaped,
/// so run boundaries always fall on char boundaries.
pub fn escape_into(out: &mut String, s: &str) {
    let bytes = s.as_bytes();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if !needs_escape(b) {
            continue;
        }
        out.push_str(&s[start..i]);
        match escape_seq(b) {
            Some(seq) => out.push_str(seq),
            None => {
                out.push_str("\\u00");
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xf) as usize] as char);
            }
        }
        start = i + 1;
    }

    out.push_str(&s[start..]);
}

/// Escape `s`, borrowing it when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(needs_escape) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(escaped_len(s));
    escape_into(&mut out, s);
    Cow::Owned(out)
}

/// Reverse [`escape`].
///
/// # Errors
///
/// Returns an error if `s` contains an unescaped `"`, a raw control
/// character, a dangling `\`, or an invalid escape sequence.
pub fn unescape(s: &str) -> Result<String> {
    if !s.bytes().any(needs_escape) {
        return Ok(s.to_string());
    }
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    quoted.push_str(s);
    quoted.push('"');
    Ok(serde_json::from_str(&quoted)?)
}
