//! Error types for the protocol layer.
//!
//! Each Deathlink crate defines its own error enum. A `ProtocolError`
//! always means "these bytes could not be turned into a message" (or the
//! other way around), never a networking or policy problem.

/// Errors that can occur while encoding or decoding messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// JSON serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// JSON deserialization failed.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame ended before a field could be read.
    #[error("truncated frame: needed {needed} bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    /// A string field was not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The frame's data id doesn't name a message we know.
    #[error("unknown data id: {0:?}")]
    UnknownDataId(String),

    /// An enum ordinal or flag byte was out of range.
    #[error("invalid value {value} for {field}")]
    InvalidEnum { field: &'static str, value: i32 },

    /// Bytes were left over after the message body.
    #[error("{0} trailing bytes after message body")]
    TrailingBytes(usize),

    /// The frame is structurally broken in some other way.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
