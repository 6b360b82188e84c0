//! Protocol module - packet types and packets.
//!
//! This module implements the packet layer:
//! - Single-byte packet type taxonomy and labels
//! - Packet struct carrying metadata and body

mod packet;
mod packet_type;

pub use packet::Packet;
pub use packet_type::{
    type_text, PacketType, TYPE_PULL, TYPE_PUSH, TYPE_REPLY, TYPE_UNDEFINED,
};
