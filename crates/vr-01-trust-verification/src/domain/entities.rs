//! # Verification Entities

use crate::domain::errors::VerificationError;
use openssl::x509::X509;

/// Certificates of the configured signing CA, leaf-most first.
///
/// A signer is trusted when it was issued directly by one of these.
#[derive(Clone, Default)]
pub struct TrustedChain {
    certificates: Vec<X509>,
}

impl TrustedChain {
    pub fn new(certificates: Vec<X509>) -> Self {
        Self { certificates }
    }

    /// Build a chain from DER encoded certificates.
    pub fn from_der_certificates<B: AsRef<[u8]>>(ders: &[B]) -> Result<Self, VerificationError> {
        let certificates = ders
            .iter()
            .map(|der| {
                X509::from_der(der.as_ref())
                    .map_err(|e| VerificationError::DecodeError(format!("chain certificate: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { certificates })
    }

    pub fn certificates(&self) -> &[X509] {
        &self.certificates
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }
}

impl std::fmt::Debug for TrustedChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subjects: Vec<String> = self
            .certificates
            .iter()
            .map(|cert| crate::domain::envelope::name_to_string(cert.subject_name()))
            .collect();
        f.debug_struct("TrustedChain")
            .field("subjects", &subjects)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestPki;

    #[test]
    fn test_from_der_certificates_rejects_garbage() {
        let result = TrustedChain::from_der_certificates(&[b"garbage".to_vec()]);
        assert!(matches!(result, Err(VerificationError::DecodeError(_))));
    }

    #[test]
    fn test_from_der_certificates_keeps_order() {
        let pki = TestPki::generate();
        let ders = vec![
            pki.root.cert.to_der().unwrap(),
            pki.rogue_root.cert.to_der().unwrap(),
        ];
        let chain = TrustedChain::from_der_certificates(&ders).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.certificates()[0].to_der().unwrap(), ders[0]);
        assert!(format!("{:?}", chain).contains("Relay Test Root CA"));
    }
}
