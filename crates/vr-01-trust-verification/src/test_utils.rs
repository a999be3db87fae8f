//! # Test Utilities
//!
//! A throwaway PKI generated with openssl at test time: a trusted root CA,
//! a signer it issued, and two signers it did not issue. Also builds signed
//! envelopes and CRLs so no binary fixtures need to be checked in.

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::pkey::{PKey, Private};
use openssl::sign::Signer;
use openssl::stack::Stack;
use openssl::x509::extension::{BasicConstraints, KeyUsage, SubjectKeyIdentifier};
use openssl::x509::{X509Builder, X509Name, X509NameBuilder, X509NameRef, X509};

const X509_VERSION_3: i32 = 2;
const VALIDITY_DAYS: u32 = 365;

/// A certificate together with its private key.
#[derive(Clone)]
pub struct Identity {
    pub cert: X509,
    pub key: PKey<Private>,
}

impl Identity {
    pub fn der(&self) -> Vec<u8> {
        self.cert.to_der().expect("certificate encodes")
    }
}

/// Generated test PKI.
pub struct TestPki {
    /// Trusted signing CA.
    pub root: Identity,
    /// Envelope signer issued by `root`.
    pub signer: Identity,
    /// Unrelated self-signed CA.
    pub rogue_root: Identity,
    /// Signer issued by `rogue_root`; self-consistent but not trusted.
    pub foreign_signer: Identity,
    /// Signer whose issuer DN names `root` but which `rogue_root` signed.
    pub forged_signer: Identity,
}

fn generate_key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).expect("P-256 available");
    PKey::from_ec_key(EcKey::generate(&group).expect("EC keygen")).expect("EC pkey")
}

fn name(common_name: &str) -> X509Name {
    let mut builder = X509NameBuilder::new().expect("name builder");
    builder
        .append_entry_by_text("CN", common_name)
        .expect("CN entry");
    builder
        .append_entry_by_text("O", "VA Relay Test")
        .expect("O entry");
    builder.build()
}

fn build_certificate(
    subject: &X509NameRef,
    key: &PKey<Private>,
    issuer: &X509NameRef,
    issuer_key: &PKey<Private>,
    is_ca: bool,
) -> X509 {
    let mut builder = X509Builder::new().expect("x509 builder");
    builder.set_version(X509_VERSION_3).expect("version");

    let mut serial = BigNum::new().expect("bignum");
    serial
        .rand(64, MsbOption::MAYBE_ZERO, false)
        .expect("random serial");
    builder
        .set_serial_number(&serial.to_asn1_integer().expect("asn1 serial"))
        .expect("serial");

    builder.set_subject_name(subject).expect("subject");
    builder.set_issuer_name(issuer).expect("issuer");
    builder.set_pubkey(key).expect("pubkey");
    builder
        .set_not_before(&Asn1Time::days_from_now(0).expect("not before"))
        .expect("not before");
    builder
        .set_not_after(&Asn1Time::days_from_now(VALIDITY_DAYS).expect("not after"))
        .expect("not after");

    if is_ca {
        builder
            .append_extension(BasicConstraints::new().critical().ca().build().expect("bc"))
            .expect("bc");
        builder
            .append_extension(
                KeyUsage::new()
                    .critical()
                    .key_cert_sign()
                    .crl_sign()
                    .build()
                    .expect("ku"),
            )
            .expect("ku");
    } else {
        builder
            .append_extension(KeyUsage::new().digital_signature().build().expect("ku"))
            .expect("ku");
    }
    let ski = SubjectKeyIdentifier::new()
        .build(&builder.x509v3_context(None, None))
        .expect("ski");
    builder.append_extension(ski).expect("ski");

    builder
        .sign(issuer_key, MessageDigest::sha256())
        .expect("sign certificate");
    builder.build()
}

impl TestPki {
    pub fn generate() -> Self {
        let root_key = generate_key();
        let root_name = name("Relay Test Root CA");
        let root_cert = build_certificate(&root_name, &root_key, &root_name, &root_key, true);

        let rogue_key = generate_key();
        let rogue_name = name("Rogue CA");
        let rogue_cert = build_certificate(&rogue_name, &rogue_key, &rogue_name, &rogue_key, true);

        let signer_key = generate_key();
        let signer_cert = build_certificate(
            &name("Relay Envelope Signer"),
            &signer_key,
            &root_name,
            &root_key,
            false,
        );

        let foreign_key = generate_key();
        let foreign_cert = build_certificate(
            &name("Foreign Envelope Signer"),
            &foreign_key,
            &rogue_name,
            &rogue_key,
            false,
        );

        let forged_key = generate_key();
        let forged_cert = build_certificate(
            &name("Forged Envelope Signer"),
            &forged_key,
            &root_name,
            &rogue_key,
            false,
        );

        Self {
            root: Identity {
                cert: root_cert,
                key: root_key,
            },
            signer: Identity {
                cert: signer_cert,
                key: signer_key,
            },
            rogue_root: Identity {
                cert: rogue_cert,
                key: rogue_key,
            },
            foreign_signer: Identity {
                cert: foreign_cert,
                key: foreign_key,
            },
            forged_signer: Identity {
                cert: forged_cert,
                key: forged_key,
            },
        }
    }

    /// Issue an end-entity certificate from `root`.
    pub fn issue_end_entity(&self, common_name: &str) -> Identity {
        let key = generate_key();
        let cert = build_certificate(
            &name(common_name),
            &key,
            self.root.cert.subject_name(),
            &self.root.key,
            false,
        );
        Identity { cert, key }
    }

    /// Issue a CRL from `root` carrying `crl_number`.
    ///
    /// When `delta_base` is set the CRL is a delta CRL against that base number.
    pub fn issue_crl(&self, crl_number: u64, delta_base: Option<u64>) -> Vec<u8> {
        build_crl(&self.root, crl_number, delta_base)
    }
}

/// Wrap `payload` in a PKCS#7 signed-data envelope that embeds the signer certificate.
pub fn sign_envelope(signer: &Identity, payload: &[u8]) -> Vec<u8> {
    sign_with_flags(signer, payload, Pkcs7Flags::BINARY)
}

/// Same as `sign_envelope` but without the embedded certificate set.
pub fn sign_envelope_without_certs(signer: &Identity, payload: &[u8]) -> Vec<u8> {
    sign_with_flags(signer, payload, Pkcs7Flags::BINARY | Pkcs7Flags::NOCERTS)
}

fn sign_with_flags(signer: &Identity, payload: &[u8], flags: Pkcs7Flags) -> Vec<u8> {
    let extra = Stack::new().expect("stack");
    Pkcs7::sign(&signer.cert, &signer.key, &extra, payload, flags)
        .expect("pkcs7 sign")
        .to_der()
        .expect("pkcs7 der")
}

// =============================================================================
// CRL DER construction
// =============================================================================

// The openssl crate parses CRLs but cannot build them; TBSCertList is encoded
// here and signed with the CA key.

const ECDSA_WITH_SHA256: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02];
const OID_CRL_NUMBER: &[u8] = &[0x06, 0x03, 0x55, 0x1D, 0x14];
const OID_DELTA_CRL_INDICATOR: &[u8] = &[0x06, 0x03, 0x55, 0x1D, 0x1B];

/// thisUpdate / nextUpdate used for every generated CRL.
pub const CRL_THIS_UPDATE: &str = "250101000000Z";
pub const CRL_NEXT_UPDATE: &str = "350101000000Z";

fn der_len(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes: Vec<u8> = len
        .to_be_bytes()
        .iter()
        .copied()
        .skip_while(|b| *b == 0)
        .collect();
    let mut out = vec![0x80 | bytes.len() as u8];
    out.extend(bytes);
    out
}

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(der_len(content.len()));
    out.extend_from_slice(content);
    out
}

fn der_integer(value: u64) -> Vec<u8> {
    let mut bytes: Vec<u8> = value
        .to_be_bytes()
        .iter()
        .copied()
        .skip_while(|b| *b == 0)
        .collect();
    if bytes.first().map_or(true, |b| b & 0x80 != 0) {
        bytes.insert(0, 0x00);
    }
    tlv(0x02, &bytes)
}

fn extension(oid: &[u8], critical: bool, value: &[u8]) -> Vec<u8> {
    let mut body = oid.to_vec();
    if critical {
        body.extend_from_slice(&[0x01, 0x01, 0xFF]);
    }
    body.extend(tlv(0x04, value));
    tlv(0x30, &body)
}

fn build_crl(issuer: &Identity, crl_number: u64, delta_base: Option<u64>) -> Vec<u8> {
    let algorithm = tlv(0x30, ECDSA_WITH_SHA256);

    let mut extensions = extension(OID_CRL_NUMBER, false, &der_integer(crl_number));
    if let Some(base) = delta_base {
        extensions.extend(extension(OID_DELTA_CRL_INDICATOR, true, &der_integer(base)));
    }

    let mut tbs = der_integer(1);
    tbs.extend(&algorithm);
    tbs.extend(issuer.cert.subject_name().to_der().expect("issuer name der"));
    tbs.extend(tlv(0x17, CRL_THIS_UPDATE.as_bytes()));
    tbs.extend(tlv(0x17, CRL_NEXT_UPDATE.as_bytes()));
    tbs.extend(tlv(0xA0, &tlv(0x30, &extensions)));
    let tbs = tlv(0x30, &tbs);

    let mut signer = Signer::new(MessageDigest::sha256(), &issuer.key).expect("crl signer");
    let signature = signer.sign_oneshot_to_vec(&tbs).expect("crl signature");
    let mut bit_string = vec![0x00];
    bit_string.extend(signature);

    let mut crl = tbs;
    crl.extend(algorithm);
    crl.extend(tlv(0x03, &bit_string));
    tlv(0x30, &crl)
}
