//! # VA Publisher Service
//!
//! Implements `VaPublisherApi` on top of an `ExternalStore`.
//!
//! ## Flow
//!
//! 1. Only-revoked gate (explicit deletes bypass it)
//! 2. Write plan chosen from event kind and revocation reason
//! 3. Redaction of the outgoing row
//! 4. Primary write, with a single fallback on unique violation or zero rows
//!
//! Connectivity failures end the publish immediately; only a unique
//! violation or a zero-row update triggers the fallback write.


use crate::domain::config::PublisherConfig;
use crate::domain::entities::{PublishAck, WriteAction, WriteOutcome};
use crate::domain::errors::{ExternalStoreError, PublishError};
use crate::domain::policy;
use crate::ports::inbound::VaPublisherApi;
use crate::ports::outbound::ExternalStore;
use shared_types::{
    CertificateRecord, CertificateStatus, CrlRecord, EventKind, ReplicationEvent,
    RevocationReason,
};
use tracing::{debug, error, info};

/// The VA Publisher Service.
pub struct VaPublisherService<S: ExternalStore> {
    store: S,
    config: PublisherConfig,
}

impl<S: ExternalStore> VaPublisherService<S> {
    pub fn new(store: S, config: PublisherConfig) -> Self {
        info!(
            data_source = %config.data_source,
            only_publish_revoked = config.only_publish_revoked,
            no_metadata = config.no_metadata,
            store_cert = config.store_cert,
            store_crl = config.store_crl,
            "[vr-03] VA publisher configured"
        );
        if config.protect {
            debug!(
                data_source = %config.data_source,
                "[vr-03] Row protection requested; delegated to the external store"
            );
        }
        Self { store, config }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn insert_else_update(&self, row: &CertificateRecord) -> Result<WriteOutcome, ExternalStoreError> {
        match self.store.insert_certificate(row) {
            Ok(_) => Ok(WriteOutcome::Inserted),
            Err(ExternalStoreError::UniqueViolation(cause)) => {
                debug!(fingerprint = %row.fingerprint, "[vr-03] Row exists, updating instead");
                match self.store.update_certificate(row)? {
                    0 => Err(ExternalStoreError::UniqueViolation(cause)),
                    _ => Ok(WriteOutcome::Updated),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn update_else_insert(&self, row: &CertificateRecord) -> Result<WriteOutcome, ExternalStoreError> {
        if self.store.update_certificate(row)? > 0 {
            return Ok(WriteOutcome::Updated);
        }
        debug!(fingerprint = %row.fingerprint, "[vr-03] No row to update, inserting");
        match self.store.insert_certificate(row) {
            Ok(_) => Ok(WriteOutcome::Inserted),
            // A concurrent publisher inserted the row between our two calls.
            Err(ExternalStoreError::UniqueViolation(cause)) => {
                match self.store.update_certificate(row)? {
                    0 => Err(ExternalStoreError::UniqueViolation(cause)),
                    _ => Ok(WriteOutcome::Updated),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn delete(&self, row: &CertificateRecord) -> Result<WriteOutcome, ExternalStoreError> {
        match self.store.delete_certificate(&row.fingerprint)? {
            0 => {
                debug!(fingerprint = %row.fingerprint, "[vr-03] Row already absent");
                Ok(WriteOutcome::AlreadyAbsent)
            }
            _ => Ok(WriteOutcome::Deleted),
        }
    }

    fn store_crl_row(&self, row: &CrlRecord) -> Result<WriteOutcome, ExternalStoreError> {
        match self.store.insert_crl(row) {
            Ok(_) => Ok(WriteOutcome::Inserted),
            Err(ExternalStoreError::UniqueViolation(cause)) => match self.store.update_crl(row)? {
                0 => Err(ExternalStoreError::UniqueViolation(cause)),
                _ => Ok(WriteOutcome::Updated),
            },
            Err(e) => Err(e),
        }
    }

    fn failure(&self, cause: ExternalStoreError, info: String) -> PublishError {
        let data_source = self.config.data_source.clone();
        let err = match cause {
            ExternalStoreError::Connectivity(cause) => PublishError::Connectivity {
                data_source,
                info: Some(info),
                cause,
            },
            other => PublishError::Write {
                data_source,
                info,
                cause: other.to_string(),
            },
        };
        error!(error = %err, "[vr-03] Publish failed");
        err
    }
}

impl<S: ExternalStore> VaPublisherApi for VaPublisherService<S> {
    fn publish(&self, event: ReplicationEvent) -> Result<PublishAck, PublishError> {
        let ReplicationEvent { record, kind } = event;

        if kind != EventKind::Delete
            && !policy::will_publish(&self.config, record.status, record.revocation_reason)
        {
            debug!(
                fingerprint = %record.fingerprint,
                ?kind,
                status = ?record.status,
                "[vr-03] Event filtered by only-revoked policy"
            );
            return Ok(PublishAck::Filtered);
        }

        let action = policy::plan_write(&self.config, kind, record.revocation_reason);
        let row = policy::prepare_row(record, &self.config);

        let outcome = match action {
            WriteAction::InsertElseUpdate => self.insert_else_update(&row),
            WriteAction::UpdateElseInsert => self.update_else_insert(&row),
            WriteAction::Delete => self.delete(&row),
        }
        .map_err(|cause| self.failure(cause, policy::describe_certificate(&row)))?;

        debug!(
            fingerprint = %row.fingerprint,
            ?kind,
            ?action,
            ?outcome,
            data_source = %self.config.data_source,
            "[vr-03] Certificate published"
        );
        Ok(PublishAck::Written(outcome))
    }

    fn store_crl(&self, crl: CrlRecord) -> Result<PublishAck, PublishError> {
        if !self.config.store_crl {
            debug!(issuer = %crl.issuer_dn, crl_number = crl.crl_number, "[vr-03] CRL publishing disabled");
            return Ok(PublishAck::Disabled);
        }

        let outcome = self
            .store_crl_row(&crl)
            .map_err(|cause| self.failure(cause, policy::describe_crl(&crl)))?;

        debug!(
            issuer = %crl.issuer_dn,
            crl_number = crl.crl_number,
            delta = crl.delta,
            ?outcome,
            "[vr-03] CRL published"
        );
        Ok(PublishAck::Written(outcome))
    }

    fn will_publish(&self, status: CertificateStatus, reason: RevocationReason) -> bool {
        policy::will_publish(&self.config, status, reason)
    }

    fn test_connection(&self) -> Result<(), PublishError> {
        self.store.probe().map_err(|e| {
            let cause = match e {
                ExternalStoreError::Connectivity(cause) => cause,
                other => other.to_string(),
            };
            error!(data_source = %self.config.data_source, %cause, "[vr-03] Connection test failed");
            PublishError::Connectivity {
                data_source: self.config.data_source.clone(),
                info: None,
                cause,
            }
        })
    }
}
