//! # Error Types
//!
//! Parsing errors for values and encodings shared across subsystems.

use thiserror::Error;

/// Errors raised while building shared values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Serial number is not a signed decimal integer.
    #[error("Invalid serial number: {0:?}")]
    InvalidSerialNumber(String),

    /// Numeric code does not map to a known revocation reason.
    #[error("Unknown revocation reason code: {0}")]
    UnknownRevocationReason(i32),

    /// Certificate could not be decoded.
    #[error("Malformed certificate: {0}")]
    MalformedCertificate(String),

    /// CRL could not be decoded.
    #[error("Malformed CRL: {0}")]
    MalformedCrl(String),

    /// CRL has no CRL number extension.
    #[error("CRL has no CRL number extension")]
    MissingCrlNumber,

    /// CRL number does not fit in 64 bits.
    #[error("CRL number out of range")]
    CrlNumberOutOfRange,
}

/// Errors raised while loading subsystem configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Key is not part of the configuration schema
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value cannot be converted to the key's type
    #[error("Invalid value {value:?} for configuration key {key}")]
    InvalidValue { key: String, value: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {error}")]
    Io { path: String, error: String },

    /// Configuration text is syntactically invalid
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}
