//! # Outbound Ports (Driven Ports / SPI)
//!
//! The external VA store, reduced to row-level operations. SQL and
//! connection handling live behind this trait.

use crate::domain::errors::ExternalStoreError;
use shared_types::{CertificateRecord, CrlRecord, Fingerprint};

/// Row store of an external validation authority.
///
/// Mutating calls return the number of rows affected. Inserting a row whose
/// key already exists must fail with `ExternalStoreError::UniqueViolation`.
pub trait ExternalStore: Send + Sync {
    /// INSERT a certificate row keyed by fingerprint.
    fn insert_certificate(&self, row: &CertificateRecord) -> Result<u64, ExternalStoreError>;

    /// UPDATE the certificate row with `row.fingerprint`, overwriting every column.
    fn update_certificate(&self, row: &CertificateRecord) -> Result<u64, ExternalStoreError>;

    /// DELETE the certificate row with this fingerprint.
    fn delete_certificate(&self, fingerprint: &Fingerprint) -> Result<u64, ExternalStoreError>;

    /// INSERT a CRL row keyed by (issuer DN, CRL number).
    fn insert_crl(&self, row: &CrlRecord) -> Result<u64, ExternalStoreError>;

    /// UPDATE the CRL row with the same (issuer DN, CRL number).
    fn update_crl(&self, row: &CrlRecord) -> Result<u64, ExternalStoreError>;

    /// Harmless query used to check connectivity.
    fn probe(&self) -> Result<(), ExternalStoreError>;
}
