//! # X.509 Field Extraction
//!
//! Thin views over parsed certificates and CRLs. Only the fields the CA store
//! indexes on are lifted out; everything else stays in the DER blob.

use crate::entities::{
    CertificateRecord, CertificateStatus, CertificateType, CrlRecord, Fingerprint,
    RevocationReason, SerialNumber, NOT_REVOKED_DATE, NO_PROFILE,
};
use crate::errors::ParseError;
use num_bigint::BigInt;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;

const PEM_PREFIX: &[u8] = b"-----BEGIN";
const DELTA_CRL_INDICATOR_OID: &str = "2.5.29.27";

fn millis(time: &ASN1Time) -> i64 {
    time.timestamp().saturating_mul(1000)
}

/// Indexed fields of a DER certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    pub fingerprint: Fingerprint,
    pub issuer_dn: String,
    pub subject_dn: String,
    pub serial_number: SerialNumber,
    pub not_before: i64,
    pub not_after: i64,
    pub subject_key_id: Option<String>,
    pub subject_alt_name: Option<String>,
}

impl CertificateDetails {
    pub fn from_der(der: &[u8]) -> Result<Self, ParseError> {
        let (_, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| ParseError::MalformedCertificate(e.to_string()))?;

        let mut subject_key_id = None;
        let mut subject_alt_name = None;
        for ext in cert.extensions() {
            match ext.parsed_extension() {
                ParsedExtension::SubjectKeyIdentifier(kid) => {
                    subject_key_id = Some(hex::encode(kid.0));
                }
                ParsedExtension::SubjectAlternativeName(san) => {
                    let names: Vec<String> =
                        san.general_names.iter().filter_map(general_name).collect();
                    if !names.is_empty() {
                        subject_alt_name = Some(names.join(", "));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            fingerprint: Fingerprint::of(der),
            issuer_dn: cert.issuer().to_string(),
            subject_dn: cert.subject().to_string(),
            // DER INTEGER content is two's complement; `serial` would read it unsigned.
            serial_number: SerialNumber::parse(
                &BigInt::from_signed_bytes_be(cert.tbs_certificate.raw_serial()).to_string(),
            )?,
            not_before: millis(&cert.validity().not_before),
            not_after: millis(&cert.validity().not_after),
            subject_key_id,
            subject_alt_name,
        })
    }
}

fn general_name(name: &GeneralName<'_>) -> Option<String> {
    match name {
        GeneralName::DNSName(dns) => Some(format!("dNSName={}", dns)),
        GeneralName::RFC822Name(mail) => Some(format!("rfc822name={}", mail)),
        GeneralName::URI(uri) => Some(format!("uniformResourceIdentifier={}", uri)),
        _ => None,
    }
}

impl CertificateRecord {
    /// Build an `Active` end-entity record from a DER certificate.
    ///
    /// Store-side attributes (owner, profiles, CA back-reference) are left
    /// empty for the caller to fill in.
    pub fn from_der(der: &[u8]) -> Result<Self, ParseError> {
        let details = CertificateDetails::from_der(der)?;
        Ok(Self {
            fingerprint: details.fingerprint,
            issuer_dn: details.issuer_dn,
            subject_dn: details.subject_dn,
            ca_fingerprint: None,
            status: CertificateStatus::Active,
            cert_type: CertificateType::EndEntity,
            serial_number: details.serial_number,
            not_before: details.not_before,
            expire_date: details.not_after,
            revocation_date: NOT_REVOKED_DATE,
            revocation_reason: RevocationReason::NotRevoked,
            username: None,
            tag: None,
            certificate_profile_id: NO_PROFILE,
            end_entity_profile_id: NO_PROFILE,
            update_time: 0,
            certificate: Some(der.to_vec()),
            subject_key_id: details.subject_key_id,
            subject_alt_name: details.subject_alt_name,
        })
    }
}

/// Indexed fields of a CRL, plus its DER encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlDetails {
    pub issuer_dn: String,
    pub crl_number: u64,
    pub delta: bool,
    pub this_update: i64,
    pub next_update: Option<i64>,
    pub fingerprint: Fingerprint,
    pub der: Vec<u8>,
}

impl CrlDetails {
    /// Parse a CRL given either as DER or as a PEM `X509 CRL` block.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.trim_ascii_start().starts_with(PEM_PREFIX) {
            let (_, pem) = x509_parser::pem::parse_x509_pem(bytes)
                .map_err(|e| ParseError::MalformedCrl(e.to_string()))?;
            Self::from_der(&pem.contents)
        } else {
            Self::from_der(bytes)
        }
    }

    pub fn from_der(der: &[u8]) -> Result<Self, ParseError> {
        let (_, crl) = x509_parser::parse_x509_crl(der)
            .map_err(|e| ParseError::MalformedCrl(e.to_string()))?;

        let number = crl.crl_number().ok_or(ParseError::MissingCrlNumber)?;
        let crl_number = match number.to_u64_digits().as_slice() {
            [] => 0,
            [value] => *value,
            _ => return Err(ParseError::CrlNumberOutOfRange),
        };
        let delta = crl
            .extensions()
            .iter()
            .any(|ext| ext.oid.to_id_string() == DELTA_CRL_INDICATOR_OID);

        Ok(Self {
            issuer_dn: crl.issuer().to_string(),
            crl_number,
            delta,
            this_update: millis(&crl.last_update()),
            next_update: crl.next_update().map(|t| millis(&t)),
            fingerprint: Fingerprint::of(der),
            der: der.to_vec(),
        })
    }

    pub fn into_record(self, ca_fingerprint: Fingerprint) -> CrlRecord {
        CrlRecord {
            issuer_dn: self.issuer_dn,
            ca_fingerprint,
            crl_number: self.crl_number,
            delta: self.delta,
            this_update: self.this_update,
            next_update: self.next_update,
            fingerprint: self.fingerprint,
            crl: self.der,
        }
    }
}
