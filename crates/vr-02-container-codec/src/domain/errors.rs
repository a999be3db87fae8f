//! # Codec Errors

use thiserror::Error;

/// Errors raised while encoding or decoding a container.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the container was complete
    #[error("Container truncated")]
    Truncated,

    /// A field's encoding does not match its declared type
    #[error("Container field type mismatch: {0}")]
    TypeMismatch(String),

    /// Structurally invalid content (bad value, trailing bytes, size limit)
    #[error("Malformed container: {0}")]
    Malformed(String),

    /// Leading magic bytes are not `VRSC`
    #[error("Not a container (bad magic)")]
    BadMagic,

    /// Format version is not understood by this build
    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    /// The container could not be serialized
    #[error("Container encoding failed: {0}")]
    Encoding(String),
}

impl CodecError {
    /// True for every failure on the decode path.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, CodecError::Encoding(_))
    }
}
