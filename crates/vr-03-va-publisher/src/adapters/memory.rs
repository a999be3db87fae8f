use crate::domain::errors::ExternalStoreError;
use crate::ports::outbound::ExternalStore;
use parking_lot::{Mutex, RwLock};
use shared_types::{CertificateRecord, CrlRecord, Fingerprint};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Fingerprint queried by `probe`; never a real SHA-256 hex digest.
const PROBE_FINGERPRINT: &str = "XX";

/// One call made against the store, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    InsertCertificate(Fingerprint),
    UpdateCertificate(Fingerprint),
    DeleteCertificate(Fingerprint),
    InsertCrl { issuer_dn: String, crl_number: u64 },
    UpdateCrl { issuer_dn: String, crl_number: u64 },
    Probe,
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        !matches!(self, StoreCall::Probe)
    }
}

/// In-memory external VA store.
///
/// Enforces the same uniqueness rules as the real tables and records every
/// call so tests can assert on the exact write sequence. Can be switched
/// unreachable to exercise connectivity handling.
#[derive(Default)]
pub struct InMemoryExternalStore {
    certificates: RwLock<HashMap<Fingerprint, CertificateRecord>>,
    crls: RwLock<HashMap<(String, u64), CrlRecord>>,
    calls: Mutex<Vec<StoreCall>>,
    unreachable: AtomicBool,
}

impl InMemoryExternalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.is_write()).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn certificate(&self, fingerprint: &Fingerprint) -> Option<CertificateRecord> {
        self.certificates.read().get(fingerprint).cloned()
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

    fn enter(&self, call: StoreCall) -> Result<(), ExternalStoreError> {
        trace!(?call, "External store call");
        self.calls.lock().push(call);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ExternalStoreError::Connectivity(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

impl ExternalStore for InMemoryExternalStore {
    fn insert_certificate(&self, row: &CertificateRecord) -> Result<u64, ExternalStoreError> {
        self.enter(StoreCall::InsertCertificate(row.fingerprint.clone()))?;
        let mut certificates = self.certificates.write();
        if certificates.contains_key(&row.fingerprint) {
            return Err(ExternalStoreError::UniqueViolation(format!(
                "fingerprint {} already present",
                row.fingerprint
            )));
        }
        certificates.insert(row.fingerprint.clone(), row.clone());
        Ok(1)
    }

    fn update_certificate(&self, row: &CertificateRecord) -> Result<u64, ExternalStoreError> {
        self.enter(StoreCall::UpdateCertificate(row.fingerprint.clone()))?;
        match self.certificates.write().get_mut(&row.fingerprint) {
            Some(existing) => {
                *existing = row.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_certificate(&self, fingerprint: &Fingerprint) -> Result<u64, ExternalStoreError> {
        self.enter(StoreCall::DeleteCertificate(fingerprint.clone()))?;
        Ok(u64::from(self.certificates.write().remove(fingerprint).is_some()))
    }

    fn insert_crl(&self, row: &CrlRecord) -> Result<u64, ExternalStoreError> {
        self.enter(StoreCall::InsertCrl {
            issuer_dn: row.issuer_dn.clone(),
            crl_number: row.crl_number,
        })?;
        let key = (row.issuer_dn.clone(), row.crl_number);
        let mut crls = self.crls.write();
        if crls.contains_key(&key) {
            return Err(ExternalStoreError::UniqueViolation(format!(
                "CRL {} of {} already present",
                row.crl_number, row.issuer_dn
            )));
        }
        crls.insert(key, row.clone());
        Ok(1)
    }

    fn update_crl(&self, row: &CrlRecord) -> Result<u64, ExternalStoreError> {
        self.enter(StoreCall::UpdateCrl {
            issuer_dn: row.issuer_dn.clone(),
            crl_number: row.crl_number,
        })?;
        match self
            .crls
            .write()
            .get_mut(&(row.issuer_dn.clone(), row.crl_number))
        {
            Some(existing) => {
                *existing = row.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn probe(&self) -> Result<(), ExternalStoreError> {
        self.enter(StoreCall::Probe)?;
        let _ = self
            .certificates
            .read()
            .get(&Fingerprint::new(PROBE_FINGERPRINT));
        Ok(())
    }
}
