//! # Trust Verification Service
//!
//! Application service implementing `TrustVerificationApi` by delegating to
//! the domain layer.

use crate::domain::entities::TrustedChain;
use crate::domain::envelope;
use crate::domain::errors::VerificationError;
use crate::ports::inbound::TrustVerificationApi;
use tracing::warn;

/// Stateless PKCS#7 verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustVerificationService;

impl TrustVerificationService {
    pub fn new() -> Self {
        Self
    }
}

impl TrustVerificationApi for TrustVerificationService {
    fn verify_and_unwrap(
        &self,
        envelope: &[u8],
        chain: &TrustedChain,
    ) -> Result<Vec<u8>, VerificationError> {
        envelope::verify_and_unwrap(envelope, chain).map_err(|e| {
            warn!(error = %e, chain_len = chain.len(), "[vr-01] Envelope rejected");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sign_envelope, TestPki};

    #[test]
    fn test_service_is_object_safe() {
        let pki = TestPki::generate();
        let api: Box<dyn TrustVerificationApi> = Box::new(TrustVerificationService::new());
        let chain = TrustedChain::new(vec![pki.root.cert.clone()]);

        let payload = api
            .verify_and_unwrap(&sign_envelope(&pki.signer, b"hello"), &chain)
            .unwrap();
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn test_service_propagates_untrusted_signer() {
        let pki = TestPki::generate();
        let service = TrustVerificationService::new();
        let chain = TrustedChain::new(vec![pki.root.cert.clone()]);

        let result = service.verify_and_unwrap(&sign_envelope(&pki.foreign_signer, b"x"), &chain);
        assert!(matches!(
            result,
            Err(VerificationError::UntrustedSigner { .. })
        ));
    }
}
