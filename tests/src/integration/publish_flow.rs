//! # Publish Flow
//!
//! Records derived from real certificates and CRLs travel through the VA
//! publisher into the in-memory VA store.

#[cfg(test)]
mod tests {
    use crate::integration::init_test_logging;
    use shared_types::{
        CertificateRecord, CertificateStatus, CrlDetails, EventKind, Fingerprint,
        ReplicationEvent, RevocationReason,
    };
    use vr_01_trust_verification::test_utils::TestPki;
    use vr_03_va_publisher::{
        InMemoryExternalStore, PublishAck, PublisherConfig, StoreCall, VaPublisherApi,
        VaPublisherService, WriteOutcome, HIDDEN_SUBJECT_DN,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn issued_record(pki: &TestPki, common_name: &str) -> CertificateRecord {
        let leaf = pki.issue_end_entity(common_name);
        let mut record = CertificateRecord::from_der(&leaf.der()).unwrap();
        record.ca_fingerprint = Some(Fingerprint::of(&pki.root.der()));
        record.username = Some(common_name.to_lowercase());
        record.tag = Some("batch-7".to_string());
        record.certificate_profile_id = 1;
        record.end_entity_profile_id = 3;
        record.update_time = 1_700_000_000_000;
        record
    }

    fn revoke(mut record: CertificateRecord, reason: RevocationReason) -> CertificateRecord {
        record.status = CertificateStatus::Revoked;
        record.revocation_reason = reason;
        record.revocation_date = 1_700_000_900_000;
        record.update_time = 1_700_000_900_000;
        record
    }

    fn publisher(config: PublisherConfig) -> VaPublisherService<InMemoryExternalStore> {
        init_test_logging();
        VaPublisherService::new(InMemoryExternalStore::new(), config)
    }

    // =============================================================================
    // CERTIFICATE LIFECYCLE
    // =============================================================================

    /// Test: issue, re-deliver, revoke, delete of one certificate keeps a single VA row in step.
    #[test]
    fn test_certificate_lifecycle_reaches_va() {
        let pki = TestPki::generate();
        let service = publisher(PublisherConfig::default());
        let record = issued_record(&pki, "Alice");
        let fingerprint = record.fingerprint.clone();

        let first = service
            .publish(ReplicationEvent::new(record.clone(), EventKind::New))
            .unwrap();
        let again = service
            .publish(ReplicationEvent::new(record.clone(), EventKind::New))
            .unwrap();
        assert_eq!(first, PublishAck::Written(WriteOutcome::Inserted));
        assert_eq!(again, PublishAck::Written(WriteOutcome::Updated));
        assert_eq!(service.store().certificate_count(), 1);

        let revoked = revoke(record, RevocationReason::KeyCompromise);
        service
            .publish(ReplicationEvent::new(revoked.clone(), EventKind::Revoke))
            .unwrap();
        let row = service.store().certificate(&fingerprint).unwrap();
        assert_eq!(row.status, CertificateStatus::Revoked);
        assert_eq!(row.certificate, revoked.certificate);

        service
            .publish(ReplicationEvent::new(revoked, EventKind::Delete))
            .unwrap();
        assert_eq!(service.store().certificate_count(), 0);
    }

    /// Test: only-revoked VA with metadata redaction sees revocations but never owners.
    #[test]
    fn test_only_revoked_redacted_va() {
        let pki = TestPki::generate();
        let service = publisher(
            PublisherConfig::new()
                .with_only_publish_revoked(true)
                .with_no_metadata(true)
                .with_store_cert(false),
        );
        let record = issued_record(&pki, "Bob");
        let fingerprint = record.fingerprint.clone();

        let ack = service
            .publish(ReplicationEvent::new(record.clone(), EventKind::New))
            .unwrap();
        assert_eq!(ack, PublishAck::Filtered);
        assert_eq!(service.store().write_count(), 0);

        let revoked = revoke(record.clone(), RevocationReason::CertificateHold);
        service
            .publish(ReplicationEvent::new(revoked, EventKind::Revoke))
            .unwrap();
        let row = service.store().certificate(&fingerprint).unwrap();
        assert_eq!(row.subject_dn, HIDDEN_SUBJECT_DN);
        assert_eq!(row.username, None);
        assert_eq!(row.tag, None);
        assert_eq!(row.end_entity_profile_id, 0);
        assert_eq!(row.certificate, None);
        assert_eq!(row.serial_number, record.serial_number);

        // Taken off hold: leaves the revoked set, so the VA row goes away.
        let mut released = record;
        released.revocation_reason = RevocationReason::RemoveFromCrl;
        service.store().clear_calls();
        service
            .publish(ReplicationEvent::new(released, EventKind::Revoke))
            .unwrap();
        assert_eq!(
            service.store().calls(),
            vec![StoreCall::DeleteCertificate(fingerprint)]
        );
        assert_eq!(service.store().certificate_count(), 0);
    }

    // =============================================================================
    // CRL PUBLISHING
    // =============================================================================

    /// Test: a parsed CRL is published once per (issuer, number).
    #[test]
    fn test_crl_reaches_va() {
        let pki = TestPki::generate();
        let service = publisher(PublisherConfig::default());
        let ca_fingerprint = Fingerprint::of(&pki.root.der());

        let full = CrlDetails::parse(&pki.issue_crl(10, None))
            .unwrap()
            .into_record(ca_fingerprint.clone());
        let delta = CrlDetails::parse(&pki.issue_crl(11, Some(10)))
            .unwrap()
            .into_record(ca_fingerprint);
        let issuer = full.issuer_dn.clone();

        service.store_crl(full.clone()).unwrap();
        service.store_crl(full).unwrap();
        service.store_crl(delta).unwrap();

        assert_eq!(service.store().crl_count(), 2);
        assert!(!service.store().crl(&issuer, 10).unwrap().delta);
        assert!(service.store().crl(&issuer, 11).unwrap().delta);
    }

    /// Test: an unreachable VA is reported as a connectivity failure by the connection test and publish alike.
    #[test]
    fn test_unreachable_va() {
        let pki = TestPki::generate();
        let service = publisher(PublisherConfig::new().with_data_source("VaReplica2"));
        service.store().set_unreachable(true);

        let connection = service.test_connection().unwrap_err();
        let publish = service
            .publish(ReplicationEvent::new(issued_record(&pki, "Carol"), EventKind::New))
            .unwrap_err();

        assert_eq!(connection.kind(), publish.kind());
        assert!(publish.to_string().contains("VaReplica2"));
    }
}
