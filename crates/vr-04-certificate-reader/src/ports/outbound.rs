//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{CaInfo, LimitedCertificate, RevocationUpdate};
use crate::domain::errors::StoreError;
use shared_types::{CertificateRecord, CrlRecord, Fingerprint, SerialNumber};

/// The authoritative CA store.
///
/// Writes are idempotent: storing an already present fingerprint, or an
/// already present (issuer, CRL number), leaves a single row.
pub trait AuthoritativeStore: Send + Sync {
    fn find_ca_by_subject_dn(&self, subject_dn: &str) -> Result<Option<CaInfo>, StoreError>;

    fn find_ca_by_id(&self, ca_id: i32) -> Result<Option<CaInfo>, StoreError>;

    fn find_certificate_by_issuer_and_serial(
        &self,
        issuer_dn: &str,
        serial_number: &SerialNumber,
    ) -> Result<Option<CertificateRecord>, StoreError>;

    fn find_certificate_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<CertificateRecord>, StoreError>;

    /// Fails with `AlreadyRevoked` when the row is revoked and stays revoked.
    fn set_revocation_status(
        &self,
        fingerprint: &Fingerprint,
        update: &RevocationUpdate,
    ) -> Result<(), StoreError>;

    fn store_limited_certificate(&self, certificate: &LimitedCertificate) -> Result<(), StoreError>;

    fn store_certificate(&self, record: CertificateRecord) -> Result<(), StoreError>;

    fn find_crl(&self, issuer_dn: &str, crl_number: u64) -> Result<Option<CrlRecord>, StoreError>;

    fn store_crl(&self, crl: CrlRecord) -> Result<(), StoreError>;
}
