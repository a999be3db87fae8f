//! # Shared Types Crate
//!
//! Domain entities shared by every VA-Relay subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `CertificateRecord` and `CrlRecord` are defined
//!   once here and moved between subsystems by value.
//! - **Identity is owned by the CA store**: fingerprints are derived from the
//!   DER encoding and never reassigned by replication code.
//! - **No raw bytes in diagnostics**: `Debug` output of records elides the
//!   encoded certificate/CRL.

pub mod entities;
pub mod errors;
pub mod properties;
pub mod x509;

pub use entities::*;
pub use errors::*;
pub use properties::{parse_properties, property_bool};
pub use x509::{CertificateDetails, CrlDetails};
