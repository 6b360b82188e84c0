//! Error types for tpwire.

use thiserror::Error;

/// Main error type for all tpwire operations.
///
/// Remote errors themselves are [`crate::rerror::Rerror`] values carried in
/// packet metadata; this type only covers failures of the local API.
#[derive(Debug, Error)]
pub enum WireError {
    /// Malformed Rerror encoding or detail escape sequence.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MetaSetting template does not end with the closing suffix.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Registry already holds a Rerror with this code.
    #[error("Duplicate Rerror code: {0}")]
    DuplicateCode(i32),

    /// Packet type byte outside the defined range.
    #[error("Unknown packet type: {0}")]
    UnknownPacketType(u8),
}

/// Result type alias using WireError.
pub type Result<T> = std::result::Result<T, WireError>;
