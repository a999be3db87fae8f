//! # Envelope Verification
//!
//! Unwraps a PKCS#7 signed-data envelope in two hops:
//!
//! 1. The signature over the enveloped content must verify with the public key
//!    of the embedded signer certificate.
//! 2. The signer certificate's issuer DN must equal the subject DN of a member
//!    of the trusted chain, and that member's key must verify the signer
//!    certificate.
//!
//! Content is copied out of the envelope only after both hops pass.

use crate::domain::entities::TrustedChain;
use crate::domain::errors::VerificationError;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::stack::Stack;
use openssl::x509::store::X509StoreBuilder;
use openssl::x509::{X509NameRef, X509Ref, X509};
use std::cmp::Ordering;
use tracing::debug;

/// Render an X.509 name as `CN=...,O=...` for diagnostics.
pub(crate) fn name_to_string(name: &X509NameRef) -> String {
    name.entries()
        .map(|entry| {
            let key = entry.object().nid().short_name().unwrap_or("?");
            let value = entry
                .data()
                .as_utf8()
                .map(|s| s.to_string())
                .unwrap_or_default();
            format!("{}={}", key, value)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Verify `envelope` against `chain` and return the enveloped payload.
pub fn verify_and_unwrap(envelope: &[u8], chain: &TrustedChain) -> Result<Vec<u8>, VerificationError> {
    let pkcs7 =
        Pkcs7::from_der(envelope).map_err(|e| VerificationError::DecodeError(e.to_string()))?;

    let signed = pkcs7
        .signed()
        .ok_or_else(|| VerificationError::DecodeError("envelope is not signed-data".to_string()))?;
    if signed.certificates().map_or(true, |certs| certs.is_empty()) {
        return Err(VerificationError::SignerCertificateMissing);
    }

    let no_extra_certs =
        Stack::<X509>::new().map_err(|e| VerificationError::DecodeError(e.to_string()))?;
    let signer = pkcs7
        .signers(&no_extra_certs, Pkcs7Flags::empty())
        .ok()
        .and_then(|signers| signers.iter().next().map(|cert| cert.to_owned()))
        .ok_or(VerificationError::SignerCertificateMissing)?;

    let payload = verify_signature(&pkcs7, &no_extra_certs)?;
    check_issued_by_chain(&signer, chain)?;

    debug!(
        signer = %name_to_string(signer.subject_name()),
        payload_len = payload.len(),
        "Envelope verified"
    );
    Ok(payload)
}

/// Cryptographic signature check only. Certificate path validation is done
/// separately by `check_issued_by_chain`, hence `NOVERIFY`.
fn verify_signature(
    pkcs7: &Pkcs7,
    no_extra_certs: &Stack<X509>,
) -> Result<Vec<u8>, VerificationError> {
    let empty_store = X509StoreBuilder::new()
        .map_err(|e| VerificationError::DecodeError(e.to_string()))?
        .build();
    let mut payload = Vec::new();
    pkcs7
        .verify(
            no_extra_certs,
            &empty_store,
            None,
            Some(&mut payload),
            Pkcs7Flags::NOVERIFY,
        )
        .map_err(|e| VerificationError::SignatureInvalid(e.to_string()))?;
    Ok(payload)
}

fn check_issued_by_chain(signer: &X509Ref, chain: &TrustedChain) -> Result<(), VerificationError> {
    let trusted = chain.certificates().iter().any(|ca| {
        let name_matches = signer
            .issuer_name()
            .try_cmp(ca.subject_name())
            .map(|ord| ord == Ordering::Equal)
            .unwrap_or(false);
        name_matches
            && ca
                .public_key()
                .and_then(|key| signer.verify(&key))
                .unwrap_or(false)
    });

    if trusted {
        Ok(())
    } else {
        Err(VerificationError::UntrustedSigner {
            signer: name_to_string(signer.subject_name()),
            issuer: name_to_string(signer.issuer_name()),
        })
    }
}
