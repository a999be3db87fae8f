//! # Reader Errors

use shared_types::ParseError;
use std::path::PathBuf;
use thiserror::Error;
use vr_01_trust_verification::VerificationError;
use vr_02_container_codec::CodecError;

/// Errors reported by the authoritative store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The reader's identity may not perform this write
    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Revocation status was already set; the update changed nothing
    #[error("Certificate already revoked")]
    AlreadyRevoked,

    #[error("Store failure: {0}")]
    Backend(String),
}

/// Why a single file was not absorbed. The file stays on disk.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("File could not be read: {0}")]
    Read(String),

    #[error("Signature verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Container could not be decoded: {0}")]
    Decode(#[from] CodecError),

    #[error("Embedded certificate could not be parsed: {0}")]
    CertificateParse(ParseError),

    #[error("CRL could not be parsed: {0}")]
    CrlParse(ParseError),

    #[error("CA with subject DN {0:?} does not exist")]
    CaUnknown(String),

    #[error("Reader not authorized to write to the CA store: {0}")]
    Authorization(String),

    #[error("CA store write failed: {0}")]
    Store(String),
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Authorization(msg) => ImportError::Authorization(msg),
            other => ImportError::Store(other.to_string()),
        }
    }
}

/// Run-level failures, raised before any file is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Configured directory {0} does not exist")]
    DirectoryMissing(PathBuf),

    #[error("Configured path {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Reader lacks write rights to directory {0}")]
    DirectoryNotWritable(PathBuf),

    #[error("Signing CA {0} not found")]
    SigningCaUnknown(i32),

    #[error("Signing CA {ca_id} chain unusable: {reason}")]
    SigningCaChain { ca_id: i32, reason: String },

    #[error("Signing CA lookup failed: {0}")]
    Store(#[from] StoreError),
}
