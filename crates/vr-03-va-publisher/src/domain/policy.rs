//! # Publishing Policy
//!
//! Pure decisions taken before anything is sent to the external store:
//! the only-revoked gate, the write plan per event kind, and redaction.

use crate::domain::config::PublisherConfig;
use crate::domain::entities::WriteAction;
use shared_types::{
    CertificateRecord, CertificateStatus, CrlRecord, EventKind, RevocationReason, NO_PROFILE,
};

/// Subject DN written in place of the real one when metadata is redacted.
pub const HIDDEN_SUBJECT_DN: &str = "hidden";

/// Only-revoked gate.
///
/// With `only_publish_revoked` set, a record passes when it is revoked or is
/// being taken off the CRL. `RemoveFromCrl` must pass even though the status
/// may still read active, otherwise the un-revocation never reaches the VA.
pub fn will_publish(
    config: &PublisherConfig,
    status: CertificateStatus,
    reason: RevocationReason,
) -> bool {
    !config.only_publish_revoked
        || status == CertificateStatus::Revoked
        || reason == RevocationReason::RemoveFromCrl
}

/// Choose the store operation for an event that passed the gate.
pub fn plan_write(config: &PublisherConfig, kind: EventKind, reason: RevocationReason) -> WriteAction {
    match kind {
        EventKind::Delete => WriteAction::Delete,
        // In only-revoked mode the VA holds revoked rows only, so a record
        // leaving the revoked set is removed.
        _ if config.only_publish_revoked && reason == RevocationReason::RemoveFromCrl => {
            WriteAction::Delete
        }
        EventKind::Revoke | EventKind::Unrevoke => WriteAction::UpdateElseInsert,
        EventKind::New => WriteAction::InsertElseUpdate,
    }
}

/// Build the row to transmit. Every column is kept; only values change.
pub fn prepare_row(mut record: CertificateRecord, config: &PublisherConfig) -> CertificateRecord {
    if config.no_metadata {
        record.username = None;
        record.end_entity_profile_id = NO_PROFILE;
        record.subject_dn = HIDDEN_SUBJECT_DN.to_string();
        record.tag = None;
    }
    if !config.store_cert {
        record.certificate = None;
    }
    record
}

/// Operator-facing description of a certificate row, post-redaction.
pub fn describe_certificate(row: &CertificateRecord) -> String {
    format!(
        "Store:, Username: {}, Issuer:{}, Serno: {}, Subject: {}",
        row.username.as_deref().unwrap_or("<none>"),
        row.issuer_dn,
        row.serial_number,
        row.subject_dn
    )
}

/// Operator-facing description of a CRL row.
pub fn describe_crl(row: &CrlRecord) -> String {
    format!(
        "Store CRL:, Issuer:{}, Number: {}, Is delta: {}",
        row.issuer_dn, row.crl_number, row.delta
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CertificateType, Fingerprint, SerialNumber};

    fn record() -> CertificateRecord {
        CertificateRecord {
            fingerprint: Fingerprint::new("aa11"),
            issuer_dn: "CN=Issuing CA,O=Example".to_string(),
            subject_dn: "CN=Alice,O=Example".to_string(),
            ca_fingerprint: Some(Fingerprint::new("ca00")),
            status: CertificateStatus::Active,
            cert_type: CertificateType::EndEntity,
            serial_number: SerialNumber::parse("1234").unwrap(),
            not_before: 1_000,
            expire_date: 2_000,
            revocation_date: -1,
            revocation_reason: RevocationReason::NotRevoked,
            username: Some("alice".to_string()),
            tag: Some("vip".to_string()),
            certificate_profile_id: 3,
            end_entity_profile_id: 7,
            update_time: 1_500,
            certificate: Some(vec![0x30, 0x03, 0x02, 0x01, 0x01]),
            subject_key_id: Some("0a0b".to_string()),
            subject_alt_name: Some("dNSName=alice.example".to_string()),
        }
    }

    fn only_revoked() -> PublisherConfig {
        PublisherConfig::default().with_only_publish_revoked(true)
    }

    #[test]
    fn test_gate_open_without_only_revoked() {
        let config = PublisherConfig::default();
        assert!(will_publish(
            &config,
            CertificateStatus::Active,
            RevocationReason::NotRevoked
        ));
    }

    #[test]
    fn test_gate_only_revoked() {
        let config = only_revoked();
        assert!(!will_publish(
            &config,
            CertificateStatus::Active,
            RevocationReason::NotRevoked
        ));
        assert!(will_publish(
            &config,
            CertificateStatus::Revoked,
            RevocationReason::KeyCompromise
        ));
        assert!(will_publish(
            &config,
            CertificateStatus::Active,
            RevocationReason::RemoveFromCrl
        ));
    }

    #[test]
    fn test_plan_write_per_event_kind() {
        let config = PublisherConfig::default();
        let reason = RevocationReason::Unspecified;
        assert_eq!(
            plan_write(&config, EventKind::New, reason),
            WriteAction::InsertElseUpdate
        );
        assert_eq!(
            plan_write(&config, EventKind::Revoke, reason),
            WriteAction::UpdateElseInsert
        );
        assert_eq!(
            plan_write(&config, EventKind::Unrevoke, RevocationReason::RemoveFromCrl),
            WriteAction::UpdateElseInsert
        );
        assert_eq!(
            plan_write(&config, EventKind::Delete, reason),
            WriteAction::Delete
        );
    }

    #[test]
    fn test_remove_from_crl_in_only_revoked_mode_deletes() {
        let config = only_revoked();
        for kind in [EventKind::Revoke, EventKind::Unrevoke, EventKind::New] {
            assert_eq!(
                plan_write(&config, kind, RevocationReason::RemoveFromCrl),
                WriteAction::Delete
            );
        }
        assert_eq!(
            plan_write(&config, EventKind::Revoke, RevocationReason::KeyCompromise),
            WriteAction::UpdateElseInsert
        );
    }

    #[test]
    fn test_redaction_clears_metadata_only() {
        let config = PublisherConfig::default().with_no_metadata(true);
        let row = prepare_row(record(), &config);

        assert_eq!(row.username, None);
        assert_eq!(row.tag, None);
        assert_eq!(row.end_entity_profile_id, NO_PROFILE);
        assert_eq!(row.subject_dn, HIDDEN_SUBJECT_DN);
        // untouched columns
        assert_eq!(row.certificate_profile_id, 3);
        assert_eq!(row.issuer_dn, "CN=Issuing CA,O=Example");
        assert!(row.certificate.is_some());
        assert_eq!(row.subject_alt_name, record().subject_alt_name);
    }

    #[test]
    fn test_store_cert_off_drops_only_the_certificate() {
        let config = PublisherConfig::default().with_store_cert(false);
        let row = prepare_row(record(), &config);

        let mut expected = record();
        expected.certificate = None;
        assert_eq!(row, expected);
    }

    #[test]
    fn test_description_never_contains_certificate_bytes() {
        let config = PublisherConfig::default().with_no_metadata(true);
        let info = describe_certificate(&prepare_row(record(), &config));
        assert_eq!(
            info,
            "Store:, Username: <none>, Issuer:CN=Issuing CA,O=Example, Serno: 1234, Subject: hidden"
        );
    }
}
