//! # tpwire
//!
//! Packet types and remote-error metadata for a pull/reply/push RPC wire
//! protocol.
//!
//! ## Architecture
//!
//! - **Packet types** (`protocol`): `PULL`, `REPLY`, `PUSH` type bytes and labels
//! - **Rerror** (`rerror`): structured remote errors with a canonical encoding
//! - **MetaSetting** (`rerror`): pre-rendered error templates injected into
//!   packet metadata without re-encoding
//!
//! ## Example
//!
//! ```
//! use tpwire::protocol::{Packet, TYPE_REPLY};
//! use tpwire::rerror::{registry, Rerror};
//!
//! // Once, during startup
//! let reg = registry::init();
//!
//! // On a failed write
//! let mut reply = Packet::new(TYPE_REPLY, 1, "/echo");
//! reply.set_rerror(reg.conn_closed(), Some("peer reset"));
//!
//! let rerr = reply.rerror().unwrap().unwrap();
//! assert_eq!(rerr.code(), 102);
//! assert_eq!(rerr.message(), "Connection Closed");
//! assert_eq!(rerr.detail(), "peer reset");
//! ```

pub mod error;
pub mod meta;
pub mod protocol;
pub mod rerror;

pub use error::{Result, WireError};
pub use meta::{MetaSink, MetaSource, Metadata, META_RERROR_KEY};
pub use protocol::{type_text, Packet, PacketType};
pub use rerror::{MetaSetting, Registry, Rerror};
