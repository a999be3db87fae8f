//! # Store Entities
//!
//! Values exchanged with the authoritative CA store beyond the shared records.

use shared_types::{CertificateStatus, Fingerprint, RevocationReason, SerialNumber};

/// A CA known to the authoritative store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaInfo {
    pub ca_id: i32,
    pub subject_dn: String,
    /// Fingerprint of the CA's own certificate (first in `certificate_chain`).
    pub fingerprint: Fingerprint,
    /// DER certificates, the CA's own first, then up to its root.
    pub certificate_chain: Vec<Vec<u8>>,
}

/// Revocation state applied to an existing certificate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevocationUpdate {
    pub status: CertificateStatus,
    pub reason: RevocationReason,
    pub revocation_date: i64,
    pub update_time: i64,
}

/// Placeholder for a certificate known only by issuer and serial.
///
/// Written when a redacted container names a certificate the store has never
/// seen. Subject and profile data are unknown and stay unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedCertificate {
    pub issuer_dn: String,
    pub serial_number: SerialNumber,
    pub ca_fingerprint: Fingerprint,
    pub status: CertificateStatus,
    pub revocation_reason: RevocationReason,
    pub revocation_date: i64,
    pub update_time: i64,
}

impl LimitedCertificate {
    /// Stable row key derived from issuer and serial, since no DER exists.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(format!("{};{}", self.issuer_dn, self.serial_number).as_bytes())
    }
}
