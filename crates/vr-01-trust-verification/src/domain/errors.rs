//! # Verification Errors
//!
//! Failure kinds of inbound envelope authentication. All of them are scoped to
//! a single file; callers skip the file and keep going.

use thiserror::Error;

/// Errors that can occur while unwrapping a signed container.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The envelope is not a well-formed PKCS#7 signed-data structure
    #[error("Malformed envelope: {0}")]
    DecodeError(String),

    /// No embedded certificate matches the signer information
    #[error("Signer certificate missing from envelope")]
    SignerCertificateMissing,

    /// The signature over the payload does not verify
    #[error("Envelope signature invalid: {0}")]
    SignatureInvalid(String),

    /// The signer certificate was not issued by any member of the trusted chain
    #[error("Signer {signer:?} (issuer {issuer:?}) does not chain to a trusted CA")]
    UntrustedSigner { signer: String, issuer: String },
}
