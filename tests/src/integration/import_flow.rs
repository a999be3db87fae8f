//! # Import Flow
//!
//! A CA-side record is packed into a container, signed, dropped into the
//! reader's directory and absorbed into the in-memory CA store. The last test
//! closes the loop by publishing the absorbed revocation to a VA.

#[cfg(test)]
mod tests {
    use crate::integration::init_test_logging;
    use shared_types::{
        CertificateDetails, CertificateRecord, CertificateStatus, EventKind, Fingerprint,
        ReplicationEvent, RevocationReason,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use vr_01_trust_verification::test_utils::{sign_envelope, Identity, TestPki};
    use vr_02_container_codec::{BincodeContainerCodec, Container, ContainerCodec};
    use vr_03_va_publisher::{
        InMemoryExternalStore, PublisherConfig, VaPublisherApi, VaPublisherService,
        HIDDEN_SUBJECT_DN,
    };
    use vr_04_certificate_reader::{
        CaInfo, CertificateCrlReader, CertificateCrlReaderApi, ImportOutcome,
        InMemoryAuthoritativeStore, ReaderConfig,
    };

    const SIGNING_CA_ID: i32 = 7;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Site {
        _root: TempDir,
        certs: PathBuf,
        crls: PathBuf,
        config: ReaderConfig,
    }

    fn site() -> Site {
        let root = TempDir::new().unwrap();
        let certs = root.path().join("certificates");
        let crls = root.path().join("crls");
        fs::create_dir(&certs).unwrap();
        fs::create_dir(&crls).unwrap();
        let config = ReaderConfig::from_properties(&format!(
            "# reader worker\ncertificate.directory={}\ncrl.directory={}\nsigning.ca.id={}\n",
            certs.display(),
            crls.display(),
            SIGNING_CA_ID
        ))
        .unwrap();
        Site {
            _root: root,
            certs,
            crls,
            config,
        }
    }

    fn ca_info(ca: &Identity) -> CaInfo {
        let der = ca.der();
        CaInfo {
            ca_id: SIGNING_CA_ID,
            subject_dn: CertificateDetails::from_der(&der).unwrap().subject_dn,
            fingerprint: Fingerprint::of(&der),
            certificate_chain: vec![der],
        }
    }

    fn reader(pki: &TestPki) -> CertificateCrlReader<InMemoryAuthoritativeStore> {
        init_test_logging();
        let store = InMemoryAuthoritativeStore::new();
        store.add_ca(ca_info(&pki.root));
        CertificateCrlReader::with_defaults(store)
    }

    fn drop_container(dir: &Path, name: &str, signer: &Identity, container: &Container) -> PathBuf {
        let payload = BincodeContainerCodec::new().encode(container).unwrap();
        let path = dir.join(name);
        fs::write(&path, sign_envelope(signer, &payload)).unwrap();
        path
    }

    fn ca_side_record(pki: &TestPki, common_name: &str) -> CertificateRecord {
        let mut record = CertificateRecord::from_der(&pki.issue_end_entity(common_name).der()).unwrap();
        record.username = Some(common_name.to_lowercase());
        record.update_time = 1_700_000_000_000;
        record
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    /// Test: a configured reader run absorbs a signed certificate and a CRL.
    #[test]
    fn test_configured_run_absorbs_drop_directories() {
        let pki = TestPki::generate();
        let reader = reader(&pki);
        let site = site();
        let record = ca_side_record(&pki, "Alice");
        let cert_file =
            drop_container(&site.certs, "alice.p7", &pki.signer, &Container::from_record(&record));
        let crl_file = site.crls.join("root.crl");
        fs::write(&crl_file, pki.issue_crl(1, None)).unwrap();

        let report = reader.run(&site.config).unwrap();

        assert_eq!(report.summary().imported, 2);
        assert!(!cert_file.exists());
        assert!(!crl_file.exists());
        let stored = reader.store().certificate(&record.fingerprint).unwrap();
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert_eq!(reader.store().crl_count(), 1);
    }

    /// Test: a file signed outside the trusted CA stays on disk and changes nothing.
    #[test]
    fn test_foreign_signer_is_rejected() {
        let pki = TestPki::generate();
        let reader = reader(&pki);
        let site = site();
        let record = ca_side_record(&pki, "Mallory");
        let forged = drop_container(
            &site.certs,
            "mallory.p7",
            &pki.forged_signer,
            &Container::from_record(&record),
        );

        let report = reader.run(&site.config).unwrap();

        assert_eq!(report.outcome_of(&forged), Some(ImportOutcome::VerificationFailed));
        assert!(forged.exists());
        assert_eq!(reader.store().write_count(), 0);
    }

    /// Test: a re-run after a crash applies nothing twice.
    #[test]
    fn test_rerun_is_idempotent() {
        let pki = TestPki::generate();
        let reader = reader(&pki);
        let site = site();
        let crl = pki.issue_crl(4, None);
        fs::write(site.crls.join("a.crl"), &crl).unwrap();
        reader.run(&site.config).unwrap();

        // The same CRL shows up again, as if the first deletion never happened.
        fs::write(site.crls.join("a.crl"), &crl).unwrap();
        let report = reader.run(&site.config).unwrap();

        assert_eq!(report.summary().skipped_duplicate, 1);
        assert_eq!(reader.store().crl_count(), 1);
    }

    /// Test: a redacted revocation imported from a drop file is replicated to an only-revoked VA.
    #[test]
    fn test_imported_revocation_is_republished() {
        let pki = TestPki::generate();
        let reader = reader(&pki);
        let site = site();

        let record = ca_side_record(&pki, "Dave");
        drop_container(&site.certs, "1-issue.p7", &pki.signer, &Container::from_record(&record));
        let mut revocation = Container::from_record(&record).without_certificate();
        revocation.status = CertificateStatus::Revoked;
        revocation.revocation_reason = RevocationReason::KeyCompromise;
        revocation.revocation_date = 1_700_000_700_000;
        revocation.update_time = 1_700_000_700_000;
        drop_container(&site.certs, "2-revoke.p7", &pki.signer, &revocation);

        let report = reader.run(&site.config).unwrap();
        assert_eq!(report.summary().imported, 2);

        let absorbed = reader.store().certificate(&record.fingerprint).unwrap();
        assert_eq!(absorbed.status, CertificateStatus::Revoked);

        let va = VaPublisherService::new(
            InMemoryExternalStore::new(),
            PublisherConfig::new()
                .with_only_publish_revoked(true)
                .with_no_metadata(true),
        );
        va.publish(ReplicationEvent::new(absorbed, EventKind::Revoke))
            .unwrap();

        let row = va.store().certificate(&record.fingerprint).unwrap();
        assert_eq!(row.status, CertificateStatus::Revoked);
        assert_eq!(row.revocation_reason, RevocationReason::KeyCompromise);
        assert_eq!(row.subject_dn, HIDDEN_SUBJECT_DN);
        assert_eq!(row.ca_fingerprint, Some(Fingerprint::of(&pki.root.der())));
    }
}
