//! # Trust Verification Subsystem (VR-01)
//!
//! Authenticates signed containers before their payload enters the CA store.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): envelope unwrapping and one-hop chain check
//! - **Ports Layer** (`ports/`): the `TrustVerificationApi` driving port
//! - **Service Layer** (`service.rs`): wires domain logic to the port
//!
//! ## Security Notes
//!
//! - The enveloped payload is released only after both the signature and the
//!   signer's issuance by a trusted chain member have been checked.
//! - Chain validation is one hop: issuer DN match plus signature check against
//!   the chain member's public key. Validity periods and revocation of the
//!   signer are not evaluated here.

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::entities::TrustedChain;
pub use domain::envelope::verify_and_unwrap;
pub use domain::errors::VerificationError;
pub use ports::inbound::TrustVerificationApi;
pub use service::TrustVerificationService;
