//! Certificate container import.

use super::{CertificateCrlReader, SUBSYSTEM};
use crate::domain::entities::{CaInfo, LimitedCertificate, RevocationUpdate};
use crate::domain::errors::{ImportError, StoreError};
use crate::domain::report::ImportOutcome;
use crate::ports::outbound::AuthoritativeStore;
use shared_types::{CertificateRecord, NO_PROFILE};
use tracing::debug;
use vr_01_trust_verification::{TrustVerificationApi, TrustedChain};
use vr_02_container_codec::{Container, ContainerCodec};
use vr_telemetry::log_event;

impl<S, V, C> CertificateCrlReader<S, V, C>
where
    S: AuthoritativeStore,
    V: TrustVerificationApi,
    C: ContainerCodec,
{
    pub(super) fn import_certificate_file(
        &self,
        bytes: &[u8],
        chain: Option<&TrustedChain>,
    ) -> Result<ImportOutcome, ImportError> {
        let payload = match chain {
            Some(chain) => self.verifier.verify_and_unwrap(bytes, chain)?,
            None => bytes.to_vec(),
        };
        let container = self.codec.decode(&payload)?;

        let ca = self
            .store
            .find_ca_by_subject_dn(&container.issuer_dn)?
            .ok_or_else(|| ImportError::CaUnknown(container.issuer_dn.clone()))?;

        if container.is_redacted() {
            self.apply_status(container, &ca)?;
            Ok(ImportOutcome::Imported)
        } else {
            self.store_full(container, &ca)
        }
    }

    /// Status-only container: update the known row, or leave a placeholder.
    fn apply_status(&self, container: Container, ca: &CaInfo) -> Result<(), ImportError> {
        let existing = self
            .store
            .find_certificate_by_issuer_and_serial(&container.issuer_dn, &container.serial_number)?;

        match existing {
            Some(existing) => {
                let update = RevocationUpdate {
                    status: container.status,
                    reason: container.revocation_reason,
                    revocation_date: container.revocation_date,
                    update_time: container.update_time,
                };
                match self.store.set_revocation_status(&existing.fingerprint, &update) {
                    Ok(()) => {
                        debug!(
                            fingerprint = %existing.fingerprint,
                            status = ?update.status,
                            "[vr-04] Revocation status updated"
                        );
                        Ok(())
                    }
                    Err(StoreError::AlreadyRevoked) => {
                        log_event!(
                            info,
                            SUBSYSTEM,
                            "[vr-04] Certificate already revoked, nothing to update",
                            fingerprint = %existing.fingerprint
                        );
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            None => {
                let limited = LimitedCertificate {
                    issuer_dn: container.issuer_dn,
                    serial_number: container.serial_number,
                    ca_fingerprint: ca.fingerprint.clone(),
                    status: container.status,
                    revocation_reason: container.revocation_reason,
                    revocation_date: container.revocation_date,
                    update_time: container.update_time,
                };
                self.store.store_limited_certificate(&limited)?;
                debug!(
                    issuer = %limited.issuer_dn,
                    serial = %limited.serial_number,
                    "[vr-04] Placeholder stored for unknown certificate"
                );
                Ok(())
            }
        }
    }

    fn store_full(&self, container: Container, ca: &CaInfo) -> Result<ImportOutcome, ImportError> {
        let der = container.certificate.unwrap_or_default();
        let mut record = CertificateRecord::from_der(&der).map_err(ImportError::CertificateParse)?;

        record.username = container.username;
        record.ca_fingerprint = Some(ca.fingerprint.clone());
        record.status = container.status;
        record.cert_type = container.cert_type;
        record.certificate_profile_id = container.certificate_profile_id;
        record.end_entity_profile_id = NO_PROFILE;
        record.revocation_date = container.revocation_date;
        record.revocation_reason = container.revocation_reason;
        record.update_time = container.update_time;

        let fingerprint = record.fingerprint.clone();
        if self.store.find_certificate_by_fingerprint(&fingerprint)?.as_ref() == Some(&record) {
            debug!(%fingerprint, "[vr-04] Certificate already stored, skipping");
            return Ok(ImportOutcome::SkippedDuplicate);
        }
        self.store.store_certificate(record)?;
        debug!(%fingerprint, ca_id = ca.ca_id, "[vr-04] Certificate stored");
        Ok(ImportOutcome::Imported)
    }
}
