//! Precomputed Rerror templates.
//!
//! A [`MetaSetting`] holds the canonical encoding of a Rerror with an empty
//! detail. The encoding always ends with the detail field's closing quote
//! followed by the object's closing brace:
//!
//! ```text
//! {"code":102,"message":"Connection Closed","detail":""}
//!                                                     ^^ SUFFIX
//!                                                    ^ insertion point
//! ```
//!
//! Injecting a detail splices the escaped text in front of the suffix, so
//! code and message are never re-encoded. Escaping keeps the suffix the only
//! unescaped terminator in the result.

use crate::error::{Result, WireError};
use crate::meta::{MetaSink, META_RERROR_KEY};

use super::escape::{escape_into, escaped_len};
use super::Rerror;

/// Closing delimiter of every canonical encoding.
pub const SUFFIX: &str = "\"}";

/// Length of [`SUFFIX`] in bytes.
pub const SUFFIX_LEN: usize = SUFFIX.len();

/// Reusable, pre-rendered Rerror metadata value.
///
/// # Example
///
/// ```
/// use tpwire::meta::{Metadata, META_RERROR_KEY};
/// use tpwire::rerror::{MetaSetting, Rerror};
///
/// let setting = MetaSetting::from_rerror(&Rerror::CONN_CLOSED);
///
/// let mut meta = Metadata::new();
/// setting.inject(&mut meta, Some("peer reset"));
///
/// let r = Rerror::from_meta(&meta).unwrap().unwrap();
/// assert_eq!(r.code(), 102);
/// assert_eq!(r.detail(), "peer reset");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaSetting {
    template: Box<str>,
}

impl MetaSetting {
    /// Build a template from an existing canonical encoding.
    ///
    /// `s` must be the canonical encoding of a Rerror with an empty detail,
    /// so that the only insertion point sits right before [`SUFFIX`].
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidTemplate`] if `s` does not decode, carries
    /// a detail, or is not in canonical form.
    pub fn from_encoding(s: &str) -> Result<Self> {
        let invalid = |reason: &str| WireError::InvalidTemplate(format!("{}: {:?}", reason, s));
        let rerror =
            Rerror::decode(s).map_err(|_| invalid("template is not a Rerror encoding"))?;
        if !rerror.detail().is_empty() {
            return Err(invalid("template must not carry a detail"));
        }
        if rerror.encode() != s {
            return Err(invalid("template is not in canonical form"));
        }
        Ok(Self {
            template: s.into(),
        })
    }

    /// Build a template from a Rerror, dropping any detail it carries.
    pub fn from_rerror(rerror: &Rerror) -> Self {
        let template = if rerror.detail().is_empty() {
            rerror.encode()
        } else {
            rerror.with_detail("").encode()
        };
        Self {
            template: template.into_boxed_str(),
        }
    }

    /// The stored template.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The stored template bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.template.as_bytes()
    }

    /// Template without the closing suffix.
    #[inline]
    fn prefix(&self) -> &str {
        &self.template[..self.template.len() - SUFFIX_LEN]
    }

    /// Value that [`inject`](Self::inject) would store.
    ///
    /// With a detail, the output buffer is sized up front and filled with
    /// prefix, escaped detail and suffix in a single allocation.
    pub fn render(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.template.to_string(),
            Some(detail) => {
                let prefix = self.prefix();
                let mut out =
                    String::with_capacity(prefix.len() + escaped_len(detail) + SUFFIX_LEN);
                out.push_str(prefix);
                escape_into(&mut out, detail);
                out.push_str(SUFFIX);
                out
            }
        }
    }

    /// Store the rendered value under [`META_RERROR_KEY`].
    ///
    /// Never fails and never touches the template; each call writes only
    /// into `meta`.
    #[inline]
    pub fn inject<S: MetaSink + ?Sized>(&self, meta: &mut S, detail: Option<&str>) {
        meta.set(META_RERROR_KEY, self.render(detail));
    }
}

impl From<&Rerror> for MetaSetting {
    fn from(rerror: &Rerror) -> Self {
        Self::from_rerror(rerror)
    }
}
