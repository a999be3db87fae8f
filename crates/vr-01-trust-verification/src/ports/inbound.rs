//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::TrustedChain;
use crate::domain::errors::VerificationError;

/// Trust verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait TrustVerificationApi: Send + Sync {
    /// Verify a signed envelope against `chain` and return its payload.
    ///
    /// The payload is never returned unless the signer chains to `chain`.
    fn verify_and_unwrap(
        &self,
        envelope: &[u8],
        chain: &TrustedChain,
    ) -> Result<Vec<u8>, VerificationError>;
}
