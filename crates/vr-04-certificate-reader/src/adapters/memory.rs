use crate::domain::entities::{CaInfo, LimitedCertificate, RevocationUpdate};
use crate::domain::errors::StoreError;
use crate::ports::outbound::AuthoritativeStore;
use parking_lot::RwLock;
use shared_types::{
    CertificateRecord, CertificateType, CrlRecord, Fingerprint, SerialNumber, NO_PROFILE,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::trace;

type IssuerSerial = (String, SerialNumber);

/// In-memory authoritative CA store.
///
/// Keeps the (issuer, serial) index in step with the fingerprint table and
/// counts every successful write. `deny_writes` makes all writes fail with
/// `Authorization`, as a store would for an under-privileged reader identity.
#[derive(Default)]
pub struct InMemoryAuthoritativeStore {
    cas: RwLock<Vec<CaInfo>>,
    certificates: RwLock<HashMap<Fingerprint, CertificateRecord>>,
    by_issuer_serial: RwLock<HashMap<IssuerSerial, Fingerprint>>,
    crls: RwLock<HashMap<(String, u64), CrlRecord>>,
    writes: AtomicUsize,
    deny_writes: AtomicBool,
}

impl InMemoryAuthoritativeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ca(&self, ca: CaInfo) {
        self.cas.write().push(ca);
    }

    pub fn set_deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// Successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn certificate(&self, fingerprint: &Fingerprint) -> Option<CertificateRecord> {
        self.certificates.read().get(fingerprint).cloned()
    }

    pub fn certificate_by_issuer_and_serial(
        &self,
        issuer_dn: &str,
        serial_number: &SerialNumber,
    ) -> Option<CertificateRecord> {
        let key = (issuer_dn.to_string(), serial_number.clone());
        let fingerprint = self.by_issuer_serial.read().get(&key).cloned()?;
        self.certificate(&fingerprint)
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.read().len()
    }

    pub fn crl(&self, issuer_dn: &str, crl_number: u64) -> Option<CrlRecord> {
        self.crls
            .read()
            .get(&(issuer_dn.to_string(), crl_number))
            .cloned()
    }

    pub fn crl_count(&self) -> usize {
        self.crls.read().len()
    }

    fn begin_write(&self, operation: &str) -> Result<(), StoreError> {
        trace!(operation, "CA store write");
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Authorization(format!(
                "reader may not {}",
                operation
            )));
        }
        Ok(())
    }

    fn put(&self, record: CertificateRecord) {
        let key = (record.issuer_dn.clone(), record.serial_number.clone());
        let previous = self
            .by_issuer_serial
            .write()
            .insert(key, record.fingerprint.clone());
        let mut certificates = self.certificates.write();
        // (issuer, serial) names one row: a placeholder is replaced by the real certificate.
        if let Some(previous) = previous.filter(|fp| *fp != record.fingerprint) {
            certificates.remove(&previous);
        }
        certificates.insert(record.fingerprint.clone(), record);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl AuthoritativeStore for InMemoryAuthoritativeStore {
    fn find_ca_by_subject_dn(&self, subject_dn: &str) -> Result<Option<CaInfo>, StoreError> {
        Ok(self
            .cas
            .read()
            .iter()
            .find(|ca| ca.subject_dn == subject_dn)
            .cloned())
    }

    fn find_ca_by_id(&self, ca_id: i32) -> Result<Option<CaInfo>, StoreError> {
        Ok(self.cas.read().iter().find(|ca| ca.ca_id == ca_id).cloned())
    }

    fn find_certificate_by_issuer_and_serial(
        &self,
        issuer_dn: &str,
        serial_number: &SerialNumber,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.certificate_by_issuer_and_serial(issuer_dn, serial_number))
    }

    fn find_certificate_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.certificate(fingerprint))
    }

    fn set_revocation_status(
        &self,
        fingerprint: &Fingerprint,
        update: &RevocationUpdate,
    ) -> Result<(), StoreError> {
        self.begin_write("set revocation status")?;
        let mut certificates = self.certificates.write();
        let existing = certificates
            .get_mut(fingerprint)
            .ok_or_else(|| StoreError::NotFound(format!("certificate {}", fingerprint)))?;
        if existing.status.is_revoked() && update.status.is_revoked() {
            return Err(StoreError::AlreadyRevoked);
        }
        existing.status = update.status;
        existing.revocation_reason = update.reason;
        existing.revocation_date = update.revocation_date;
        existing.update_time = update.update_time;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn store_limited_certificate(&self, certificate: &LimitedCertificate) -> Result<(), StoreError> {
        self.begin_write("store limited certificate")?;
        self.put(CertificateRecord {
            fingerprint: certificate.fingerprint(),
            issuer_dn: certificate.issuer_dn.clone(),
            subject_dn: String::new(),
            ca_fingerprint: Some(certificate.ca_fingerprint.clone()),
            status: certificate.status,
            cert_type: CertificateType::Unknown,
            serial_number: certificate.serial_number.clone(),
            not_before: 0,
            expire_date: 0,
            revocation_date: certificate.revocation_date,
            revocation_reason: certificate.revocation_reason,
            username: None,
            tag: None,
            certificate_profile_id: NO_PROFILE,
            end_entity_profile_id: NO_PROFILE,
            update_time: certificate.update_time,
            certificate: None,
            subject_key_id: None,
            subject_alt_name: None,
        });
        Ok(())
    }

    fn store_certificate(&self, record: CertificateRecord) -> Result<(), StoreError> {
        self.begin_write("store certificate")?;
        self.put(record);
        Ok(())
    }

    fn find_crl(&self, issuer_dn: &str, crl_number: u64) -> Result<Option<CrlRecord>, StoreError> {
        Ok(self.crl(issuer_dn, crl_number))
    }

    fn store_crl(&self, crl: CrlRecord) -> Result<(), StoreError> {
        self.begin_write("store CRL")?;
        self.crls
            .write()
            .insert((crl.issuer_dn.clone(), crl.crl_number), crl);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
