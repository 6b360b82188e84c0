//! Packet type taxonomy.
//!
//! Every packet carries a single type byte:
//! ```text
//! ┌──────┬───────────┬──────────────────────────┐
//! │ Byte │ Label     │ Meaning                  │
//! ├──────┼───────────┼──────────────────────────┤
//! │ 0    │ Undefined │ not set                  │
//! │ 1    │ PULL      │ request expecting reply  │
//! │ 2    │ REPLY     │ reply to a PULL          │
//! │ 3    │ PUSH      │ one-way notification     │
//! └──────┴───────────┴──────────────────────────┘
//! ```
//!
//! Values are wire-stable and must never be reassigned.

use std::fmt;

use crate::error::{Result, WireError};

/// Type byte: not set.
pub const TYPE_UNDEFINED: u8 = 0;
/// Type byte: pull (request).
pub const TYPE_PULL: u8 = 1;
/// Type byte: reply to a pull.
pub const TYPE_REPLY: u8 = 2;
/// Type byte: push.
pub const TYPE_PUSH: u8 = 3;

/// Packet kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PacketType {
    #[default]
    Undefined = TYPE_UNDEFINED,
    Pull = TYPE_PULL,
    Reply = TYPE_REPLY,
    Push = TYPE_PUSH,
}

impl PacketType {
    /// Strictly decode a type byte. Returns `None` for reserved values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            TYPE_UNDEFINED => Some(Self::Undefined),
            TYPE_PULL => Some(Self::Pull),
            TYPE_REPLY => Some(Self::Reply),
            TYPE_PUSH => Some(Self::Push),
            _ => None,
        }
    }

    /// Wire byte for this type.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Display label.
    #[inline]
    pub fn as_str(self) -> &'static str {
        type_text(self as u8)
    }
}

impl TryFrom<u8> for PacketType {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value).ok_or(WireError::UnknownPacketType(value))
    }
}

impl From<PacketType> for u8 {
    fn from(ty: PacketType) -> u8 {
        ty as u8
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a packet type byte.
///
/// Any byte outside the defined set, including values reserved for later
/// versions, is labelled `"Undefined"`.
///
/// # Example
///
/// ```
/// use tpwire::protocol::type_text;
///
/// assert_eq!(type_text(1), "PULL");
/// assert_eq!(type_text(200), "Undefined");
/// ```
#[inline]
pub fn type_text(ty: u8) -> &'static str {
    match ty {
        TYPE_PULL => "PULL",
        TYPE_REPLY => "REPLY",
        TYPE_PUSH => "PUSH",
        _ => "Undefined",
    }
}
