//! Remote errors ("Rerror").
//!
//! A Rerror is a framework-level failure carried as data in packet metadata,
//! never thrown. It has a canonical textual encoding:
//!
//! ```text
//! {"code":<i32>,"message":"<escaped>","detail":"<escaped>"}
//! ```
//!
//! Keys always appear in this order and without whitespace, so equal values
//! encode to identical bytes. The encoding is plain JSON; any JSON reader
//! can recover the three fields.
//!
//! - [`MetaSetting`] - precomputed template for fast injection into metadata
//! - [`Registry`] - framework singletons and their templates
//! - [`escape`]/[`unescape`] - string field escaping
//!
//! # Example
//!
//! ```
//! use tpwire::rerror::Rerror;
//!
//! let encoded = Rerror::CONN_CLOSED.encode();
//! assert_eq!(encoded, r#"{"code":102,"message":"Connection Closed","detail":""}"#);
//!
//! let decoded = Rerror::decode(&encoded).unwrap();
//! assert_eq!(decoded, Rerror::CONN_CLOSED);
//! ```

mod escape;
mod meta_setting;
pub mod registry;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::meta::{MetaSink, MetaSource, META_RERROR_KEY};

pub use escape::{escape, escape_into, escaped_len, unescape};
pub use meta_setting::{MetaSetting, SUFFIX, SUFFIX_LEN};
pub use registry::{Registry, RegistryBuilder};

/// Framework Rerror codes.
///
/// Application-defined codes should be greater than 1000.
pub mod codes {
    /// Unclassified failure.
    pub const UNKNOWN_ERROR: i32 = -1;
    /// Connection closed.
    pub const CONN_CLOSED: i32 = 102;
    /// Write to the connection failed.
    pub const WRITE_FAILED: i32 = 104;
    /// Dial failed.
    pub const DIAL_FAILED: i32 = 105;
    /// Malformed packet.
    pub const BAD_PACKET: i32 = 400;
    /// No handler for the service method.
    pub const NOT_FOUND: i32 = 404;
    /// Packet type or method not implemented.
    pub const NOT_IMPLEMENTED: i32 = 501;
}

const ENC_CODE: &str = "{\"code\":";
const ENC_MESSAGE: &str = ",\"message\":\"";
const ENC_DETAIL: &str = "\",\"detail\":\"";

/// Structured remote error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rerror {
    /// Error code.
    pub code: i32,
    /// Short, fixed description of the condition.
    pub message: Cow<'static, str>,
    /// Per-call context. Empty on singletons.
    #[serde(default)]
    pub detail: Cow<'static, str>,
}

impl Rerror {
    /// Unclassified failure (-1).
    pub const UNKNOWN_ERROR: Rerror = Rerror::from_static(codes::UNKNOWN_ERROR, "Unknown error");
    /// Connection closed (102).
    pub const CONN_CLOSED: Rerror = Rerror::from_static(codes::CONN_CLOSED, "Connection Closed");
    /// Write failed (104).
    pub const WRITE_FAILED: Rerror = Rerror::from_static(codes::WRITE_FAILED, "Write Failed");
    /// Dial failed (105).
    pub const DIAL_FAILED: Rerror = Rerror::from_static(codes::DIAL_FAILED, "Dial Failed");
    /// Bad packet (400).
    pub const BAD_PACKET: Rerror = Rerror::from_static(codes::BAD_PACKET, "Bad Packet");
    /// Not found (404).
    pub const NOT_FOUND: Rerror = Rerror::from_static(codes::NOT_FOUND, "Not Found");
    /// Not implemented (501).
    pub const NOT_IMPLEMENTED: Rerror =
        Rerror::from_static(codes::NOT_IMPLEMENTED, "Not Implemented");

    /// All framework singletons.
    pub const FRAMEWORK: [Rerror; 7] = [
        Self::UNKNOWN_ERROR,
        Self::CONN_CLOSED,
        Self::WRITE_FAILED,
        Self::DIAL_FAILED,
        Self::BAD_PACKET,
        Self::NOT_FOUND,
        Self::NOT_IMPLEMENTED,
    ];

    /// Create a Rerror with a static message and no detail.
    pub const fn from_static(code: i32, message: &'static str) -> Self {
        Self {
            code,
            message: Cow::Borrowed(message),
            detail: Cow::Borrowed(""),
        }
    }

    /// Create a Rerror.
    pub fn new(
        code: i32,
        message: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Copy of this Rerror with `detail` replaced.
    ///
    /// Singletons are shared; per-call context always goes into a copy.
    pub fn with_detail(&self, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            detail: detail.into(),
        }
    }

    /// Singleton for a framework code, or [`Rerror::UNKNOWN_ERROR`].
    pub fn from_code(code: i32) -> &'static Rerror {
        static FRAMEWORK: [Rerror; 7] = Rerror::FRAMEWORK;
        FRAMEWORK
            .iter()
            .find(|r| r.code == code)
            .unwrap_or(&FRAMEWORK[0])
    }

    /// Check if the code belongs to the framework set.
    pub fn is_framework(&self) -> bool {
        Self::FRAMEWORK.iter().any(|r| r.code == self.code)
    }

    /// Error code.
    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Fixed description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-call context, empty if none.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Length of the canonical encoding.
    pub fn encoded_len(&self) -> usize {
        ENC_CODE.len()
            + itoa_len(self.code)
            + ENC_MESSAGE.len()
            + escaped_len(&self.message)
            + ENC_DETAIL.len()
            + escaped_len(&self.detail)
            + SUFFIX_LEN
    }

    /// Canonical encoding.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Append the canonical encoding to `out`.
    pub fn encode_into(&self, out: &mut String) {
        use std::fmt::Write;

        out.push_str(ENC_CODE);
        // Writing to a String cannot fail
        let _ = write!(out, "{}", self.code);
        out.push_str(ENC_MESSAGE);
        escape_into(out, &self.message);
        out.push_str(ENC_DETAIL);
        escape_into(out, &self.detail);
        out.push_str(SUFFIX);
    }

    /// Parse a canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns error if `s` is not a JSON object with `code`, `message` and
    /// `detail` fields.
    pub fn decode(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encode and store under [`META_RERROR_KEY`].
    ///
    /// Re-encodes every call; prefer a [`MetaSetting`] for errors sent often.
    pub fn set_to_meta<S: MetaSink + ?Sized>(&self, meta: &mut S) {
        meta.set(META_RERROR_KEY, self.encode());
    }

    /// Recover a Rerror from packet metadata.
    ///
    /// Returns `Ok(None)` if the metadata carries no error.
    pub fn from_meta<S: MetaSource + ?Sized>(meta: &S) -> Result<Option<Self>> {
        meta.get(META_RERROR_KEY).map(Self::decode).transpose()
    }
}

fn itoa_len(n: i32) -> usize {
    let mut len = if n < 0 { 2 } else { 1 };
    let mut n = n.unsigned_abs();
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

impl fmt::Display for Rerror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::error::Error for Rerror {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Metadata;

    #[test]
    fn test_singleton_encodings() {
        assert_eq!(
            Rerror::UNKNOWN_ERROR.encode(),
            r#"{"code":-1,"message":"Unknown error","detail":""}"#
        );
        assert_eq!(
            Rerror::CONN_CLOSED.encode(),
            r#"{"code":102,"message":"Connection Closed","detail":""}"#
        );
        assert_eq!(
            Rerror::NOT_IMPLEMENTED.encode(),
            r#"{"code":501,"message":"Not Implemented","detail":""}"#
        );
    }

    #[test]
    fn test_singleton_codes() {
        assert_eq!(Rerror::UNKNOWN_ERROR.code(), -1);
        assert_eq!(Rerror::DIAL_FAILED.code(), 105);
        assert_eq!(Rerror::CONN_CLOSED.code(), 102);
        assert_eq!(Rerror::WRITE_FAILED.code(), 104);
        assert_eq!(Rerror::BAD_PACKET.code(), 400);
        assert_eq!(Rerror::NOT_FOUND.code(), 404);
        assert_eq!(Rerror::NOT_IMPLEMENTED.code(), 501);
        assert!(Rerror::FRAMEWORK.iter().all(|r| r.detail().is_empty()));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = Rerror::new(1001, "Custom".to_string(), "ctx");
        let b = Rerror::new(1001, "Custom", "ctx".to_string());
        assert_eq!(a, b);
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.encode(), a.encode());
    }

    #[test]
    fn test_encode_matches_serde_json() {
        let rerrors = [
            Rerror::BAD_PACKET,
            Rerror::new(i32::MIN, "min", "\"quoted\" \\ slash"),
            Rerror::new(i32::MAX, "tab\there", "ctl \x01 ✓"),
        ];
        for r in rerrors {
            assert_eq!(r.encode(), serde_json::to_string(&r).unwrap());
        }
    }

    #[test]
    fn test_encoded_len() {
        for r in [
            Rerror::UNKNOWN_ERROR,
            Rerror::new(0, "", ""),
            Rerror::new(-1234, "m\"", "d\n\x02"),
            Rerror::new(i32::MIN, "x", "y"),
        ] {
            assert_eq!(r.encoded_len(), r.encode().len(), "{:?}", r);
        }
    }

    #[test]
    fn test_decode_roundtrip_with_delimiters() {
        let original = Rerror::new(1500, "Odd \"message\"", r#""},"detail":"x"#);
        let decoded = Rerror::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Rerror::decode("not json").is_err());
        assert!(Rerror::decode(r#"{"code":"x","message":"","detail":""}"#).is_err());
        assert!(Rerror::decode(r#"{"code":1,"message":"m""#).is_err());
    }

    #[test]
    fn test_with_detail_leaves_singleton_untouched() {
        let r = Rerror::NOT_FOUND.with_detail("/users/42");
        assert_eq!(r.code(), codes::NOT_FOUND);
        assert_eq!(r.message(), "Not Found");
        assert_eq!(r.detail(), "/users/42");
        assert!(Rerror::NOT_FOUND.detail().is_empty());
    }

    #[test]
    fn test_from_code_fallback() {
        assert_eq!(Rerror::from_code(102), &Rerror::CONN_CLOSED);
        assert_eq!(Rerror::from_code(501), &Rerror::NOT_IMPLEMENTED);
        assert_eq!(Rerror::from_code(9999), &Rerror::UNKNOWN_ERROR);
        assert_eq!(Rerror::from_code(0), &Rerror::UNKNOWN_ERROR);
    }

    #[test]
    fn test_is_framework() {
        assert!(Rerror::WRITE_FAILED.is_framework());
        assert!(!Rerror::new(2001, "App", "").is_framework());
    }

    #[test]
    fn test_meta_roundtrip() {
        let mut meta = Metadata::new();
        assert!(Rerror::from_meta(&meta).unwrap().is_none());

        let r = Rerror::DIAL_FAILED.with_detail("127.0.0.1:9090 refused");
        r.set_to_meta(&mut meta);

        assert_eq!(meta.get(META_RERROR_KEY), Some(r.encode().as_str()));
        assert_eq!(Rerror::from_meta(&meta).unwrap(), Some(r));
    }

    #[test]
    fn test_from_meta_hashmap() {
        use std::collections::HashMap;

        let mut map: HashMap<String, String> = HashMap::new();
        assert!(Rerror::from_meta(&map).unwrap().is_none());

        Rerror::CONN_CLOSED.with_detail("peer reset").set_to_meta(&mut map);
        let r = Rerror::from_meta(&map).unwrap().unwrap();
        assert_eq!(r, Rerror::CONN_CLOSED.with_detail("peer reset"));
    }

    #[test]
    fn test_display_is_encoding() {
        assert_eq!(Rerror::BAD_PACKET.to_string(), Rerror::BAD_PACKET.encode());
    }

    #[test]
    fn test_itoa_len() {
        for n in [0, 9, 10, -1, -10, 102, i32::MAX, i32::MIN] {
            assert_eq!(itoa_len(n), n.to_string().len(), "{}", n);
        }
    }
}
