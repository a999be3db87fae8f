//! CRL import.

use super::CertificateCrlReader;
use crate::domain::errors::ImportError;
use crate::domain::report::ImportOutcome;
use crate::ports::outbound::AuthoritativeStore;
use shared_types::CrlDetails;
use tracing::debug;
use vr_01_trust_verification::TrustVerificationApi;
use vr_02_container_codec::ContainerCodec;

impl<S, V, C> CertificateCrlReader<S, V, C>
where
    S: AuthoritativeStore,
    V: TrustVerificationApi,
    C: ContainerCodec,
{
    pub(super) fn import_crl_file(&self, bytes: &[u8]) -> Result<ImportOutcome, ImportError> {
        let details = CrlDetails::parse(bytes).map_err(ImportError::CrlParse)?;

        let ca = self
            .store
            .find_ca_by_subject_dn(&details.issuer_dn)?
            .ok_or_else(|| ImportError::CaUnknown(details.issuer_dn.clone()))?;

        if self
            .store
            .find_crl(&details.issuer_dn, details.crl_number)?
            .is_some()
        {
            debug!(
                issuer = %details.issuer_dn,
                crl_number = details.crl_number,
                "[vr-04] CRL already stored, skipping"
            );
            return Ok(ImportOutcome::SkippedDuplicate);
        }

        let record = details.into_record(ca.fingerprint);
        debug!(
            issuer = %record.issuer_dn,
            crl_number = record.crl_number,
            delta = record.delta,
            "[vr-04] Storing CRL"
        );
        self.store.store_crl(record)?;
        Ok(ImportOutcome::Imported)
    }
}
