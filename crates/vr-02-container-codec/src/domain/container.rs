//! # Transport Container
//!
//! The unit carried inside a signed envelope. It names a certificate by
//! issuer and serial, optionally carries the certificate itself, and holds
//! the status metadata to apply on import.

use serde::{Deserialize, Serialize};
use shared_types::{
    CertificateRecord, CertificateStatus, CertificateType, RevocationReason, SerialNumber,
};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub issuer_dn: String,
    pub serial_number: SerialNumber,
    /// DER certificate; absent for redacted (status-only) containers.
    pub certificate: Option<Vec<u8>>,
    pub username: Option<String>,
    pub status: CertificateStatus,
    pub cert_type: CertificateType,
    pub certificate_profile_id: i32,
    pub end_entity_profile_id: i32,
    pub revocation_date: i64,
    pub revocation_reason: RevocationReason,
    pub update_time: i64,
}

impl Container {
    /// Snapshot the transportable fields of a record.
    pub fn from_record(record: &CertificateRecord) -> Self {
        Self {
            issuer_dn: record.issuer_dn.clone(),
            serial_number: record.serial_number.clone(),
            certificate: record.certificate.clone(),
            username: record.username.clone(),
            status: record.status,
            cert_type: record.cert_type,
            certificate_profile_id: record.certificate_profile_id,
            end_entity_profile_id: record.end_entity_profile_id,
            revocation_date: record.revocation_date,
            revocation_reason: record.revocation_reason,
            update_time: record.update_time,
        }
    }

    /// Drop the certificate so only status information travels.
    pub fn without_certificate(mut self) -> Self {
        self.certificate = None;
        self
    }

    pub fn is_redacted(&self) -> bool {
        self.certificate.is_none()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("issuer_dn", &self.issuer_dn)
            .field("serial_number", &self.serial_number)
            .field(
                "certificate",
                &self.certificate.as_ref().map(|der| format!("<{} bytes>", der.len())),
            )
            .field("status", &self.status)
            .field("revocation_reason", &self.revocation_reason)
            .field("update_time", &self.update_time)
            .finish_non_exhaustive()
    }
}
