//! # Core Domain Entities
//!
//! Certificate and CRL records as they live in the authoritative CA store,
//! and the change events replicated out of it.
//!
//! ## Clusters
//!
//! - **Identity**: `Fingerprint`, `SerialNumber`
//! - **Lifecycle**: `CertificateStatus`, `CertificateType`, `RevocationReason`
//! - **Records**: `CertificateRecord`, `CrlRecord`
//! - **Replication**: `EventKind`, `ReplicationEvent`

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Profile identifier meaning "no profile bound".
pub const NO_PROFILE: i32 = 0;

/// Revocation date used while a certificate is not revoked.
pub const NOT_REVOKED_DATE: i64 = -1;

// =============================================================================
// IDENTITY
// =============================================================================

/// Content-derived identifier of a certificate or CRL.
///
/// Lowercase hex SHA-256 of the DER encoding. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a DER encoding.
    pub fn of(der: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(der)))
    }

    /// Wrap an already computed fingerprint string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arbitrary-precision certificate serial number, kept as a signed decimal string.
///
/// Leading zeros are stripped on construction so equal numbers compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Parse a signed decimal serial number.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidSerialNumber(value.to_string()));
        }
        let trimmed = digits.trim_start_matches('0');
        let normalized = match (trimmed.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", trimmed),
            (false, false) => trimmed.to_string(),
        };
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SerialNumber> for String {
    fn from(serial: SerialNumber) -> Self {
        serial.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Certificate status in the CA store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateStatus {
    Unassigned,
    Inactive,
    Active,
    NotifiedAboutExpiration,
    Revoked,
    Archived,
    RolloverPending,
}

impl CertificateStatus {
    pub fn is_revoked(self) -> bool {
        self == CertificateStatus::Revoked
    }
}

/// Role of a certificate in the PKI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateType {
    Unknown,
    EndEntity,
    SubCa,
    RootCa,
    OcspSigner,
}

/// RFC 5280 revocation reason, plus the "not revoked" marker.
///
/// `RemoveFromCrl` means the certificate is leaving the revoked set (un-revocation);
/// the record status may still read `Active` while this reason is carried.
/// Serialized as its `CRLReason` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RevocationReason {
    NotRevoked,
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegesWithdrawn,
    AaCompromise,
}

impl RevocationReason {
    /// RFC 5280 `CRLReason` code; `-1` for `NotRevoked`.
    pub fn code(self) -> i32 {
        match self {
            RevocationReason::NotRevoked => -1,
            RevocationReason::Unspecified => 0,
            RevocationReason::KeyCompromise => 1,
            RevocationReason::CaCompromise => 2,
            RevocationReason::AffiliationChanged => 3,
            RevocationReason::Superseded => 4,
            RevocationReason::CessationOfOperation => 5,
            RevocationReason::CertificateHold => 6,
            RevocationReason::RemoveFromCrl => 8,
            RevocationReason::PrivilegesWithdrawn => 9,
            RevocationReason::AaCompromise => 10,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, ParseError> {
        Ok(match code {
            -1 => RevocationReason::NotRevoked,
            0 => RevocationReason::Unspecified,
            1 => RevocationReason::KeyCompromise,
            2 => RevocationReason::CaCompromise,
            3 => RevocationReason::AffiliationChanged,
            4 => RevocationReason::Superseded,
            5 => RevocationReason::CessationOfOperation,
            6 => RevocationReason::CertificateHold,
            8 => RevocationReason::RemoveFromCrl,
            9 => RevocationReason::PrivilegesWithdrawn,
            10 => RevocationReason::AaCompromise,
            other => return Err(ParseError::UnknownRevocationReason(other)),
        })
    }
}

impl From<RevocationReason> for i32 {
    fn from(reason: RevocationReason) -> Self {
        reason.code()
    }
}

impl TryFrom<i32> for RevocationReason {
    type Error = ParseError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A certificate row in the authoritative CA store.
///
/// `ca_fingerprint` is a back-reference to the issuing CA's own certificate,
/// not an ownership link. `(issuer_dn, serial_number)` is unique per issuer and
/// serves as the lookup key when the fingerprint has been redacted away.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub fingerprint: Fingerprint,
    pub issuer_dn: String,
    pub subject_dn: String,
    pub ca_fingerprint: Option<Fingerprint>,
    pub status: CertificateStatus,
    pub cert_type: CertificateType,
    pub serial_number: SerialNumber,
    /// Epoch millis.
    pub not_before: i64,
    /// Epoch millis.
    pub expire_date: i64,
    /// Epoch millis; meaningful only when revoked, otherwise `NOT_REVOKED_DATE`.
    pub revocation_date: i64,
    pub revocation_reason: RevocationReason,
    pub username: Option<String>,
    pub tag: Option<String>,
    pub certificate_profile_id: i32,
    pub end_entity_profile_id: i32,
    /// Monotonic write timestamp (epoch millis).
    pub update_time: i64,
    /// DER encoded certificate.
    pub certificate: Option<Vec<u8>>,
    pub subject_key_id: Option<String>,
    pub subject_alt_name: Option<String>,
}

impl CertificateRecord {
    pub fn is_revoked(&self) -> bool {
        self.status.is_revoked()
    }
}

impl fmt::Debug for CertificateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateRecord")
            .field("fingerprint", &self.fingerprint)
            .field("issuer_dn", &self.issuer_dn)
            .field("subject_dn", &self.subject_dn)
            .field("serial_number", &self.serial_number)
            .field("status", &self.status)
            .field("cert_type", &self.cert_type)
            .field("revocation_reason", &self.revocation_reason)
            .field("update_time", &self.update_time)
            .field(
                "certificate",
                &self.certificate.as_ref().map(|der| format!("<{} bytes>", der.len())),
            )
            .finish_non_exhaustive()
    }
}

/// A CRL row in the authoritative CA store.
///
/// `(issuer_dn, crl_number)` is unique; the number increases monotonically per issuer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrlRecord {
    pub issuer_dn: String,
    pub ca_fingerprint: Fingerprint,
    pub crl_number: u64,
    pub delta: bool,
    /// Epoch millis.
    pub this_update: i64,
    /// Epoch millis, absent when the CRL carries no nextUpdate.
    pub next_update: Option<i64>,
    pub fingerprint: Fingerprint,
    /// DER encoded CRL.
    pub crl: Vec<u8>,
}

impl fmt::Debug for CrlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrlRecord")
            .field("issuer_dn", &self.issuer_dn)
            .field("crl_number", &self.crl_number)
            .field("delta", &self.delta)
            .field("fingerprint", &self.fingerprint)
            .field("crl", &format!("<{} bytes>", self.crl.len()))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// REPLICATION
// =============================================================================

/// Kind of state transition carried by a `ReplicationEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    New,
    Revoke,
    Unrevoke,
    Delete,
}

/// An in-flight change, consumed once per configured external target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationEvent {
    pub record: CertificateRecord,
    pub kind: EventKind,
}

impl ReplicationEvent {
    pub fn new(record: CertificateRecord, kind: EventKind) -> Self {
        Self { record, kind }
    }
}
