//! Packet struct with typed accessors.
//!
//! Represents one in-memory packet: type byte, sequence number, service
//! method, metadata and body. Uses `bytes::Bytes` for zero-copy body
//! sharing. Body encoding is left to the codec layer.
//!
//! # Example
//!
//! ```
//! use tpwire::protocol::{Packet, TYPE_REPLY};
//! use tpwire::rerror::registry;
//!
//! let mut packet = Packet::new(TYPE_REPLY, 7, "/user/get");
//! packet.set_rerror(registry::global().not_found(), Some("/user/get"));
//!
//! assert_eq!(packet.type_text(), "REPLY");
//! let rerr = packet.rerror().unwrap().unwrap();
//! assert_eq!(rerr.code(), 404);
//! ```

use bytes::Bytes;

use super::packet_type::{type_text, PacketType};
use crate::error::Result;
use crate::meta::{Metadata, META_RERROR_KEY};
use crate::rerror::{MetaSetting, Rerror};

/// A single pull, reply or push packet.
#[derive(Debug, Clone, Default)]
pub struct Packet {
    /// Sequence number, shared by a pull and its reply.
    pub seq: i32,
    /// Raw packet type byte (see `packet_type`).
    pub ptype: u8,
    /// Target service method, e.g. `/user/get`.
    pub service_method: String,
    /// Per-packet metadata.
    pub meta: Metadata,
    /// Encoded body (zero-copy via `bytes::Bytes`).
    pub body: Bytes,
}

impl Packet {
    /// Create a packet with empty metadata and body.
    pub fn new(ptype: u8, seq: i32, service_method: impl Into<String>) -> Self {
        Self {
            seq,
            ptype,
            service_method: service_method.into(),
            meta: Metadata::new(),
            body: Bytes::new(),
        }
    }

    /// Set the body.
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Label of the packet type.
    #[inline]
    pub fn type_text(&self) -> &'static str {
        type_text(self.ptype)
    }

    /// Strictly decoded packet type.
    #[inline]
    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.ptype)
    }

    /// Attach a framework error to the metadata.
    pub fn set_rerror(&mut self, setting: &MetaSetting, detail: Option<&str>) {
        setting.inject(&mut self.meta, detail);
    }

    /// Check if the packet carries an error.
    #[inline]
    pub fn has_rerror(&self) -> bool {
        self.meta.get(META_RERROR_KEY).is_some()
    }

    /// Decode the error carried in the metadata, if any.
    pub fn rerror(&self) -> Result<Option<Rerror>> {
        Rerror::from_meta(&self.meta).map_err(|e| {
            tracing::warn!(
                "Undecodable Rerror in {} packet seq={}: {}",
                self.type_text(),
                self.seq,
                e
            );
            e
        })
    }
}
