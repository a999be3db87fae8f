//! # Certificate/CRL Reader Subsystem (VR-04)
//!
//! Periodically drains two drop directories into the authoritative CA store:
//!
//! - **certificate directory**: PKCS#7-signed transport containers, each
//!   carrying a full certificate or only its revocation status
//! - **CRL directory**: DER or PEM CRLs issued by CAs known to the store
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): configuration, per-file outcomes, report
//! - **Ports Layer** (`ports/`): `CertificateCrlReaderApi` (driving),
//!   `AuthoritativeStore` (driven)
//! - **Adapters** (`adapters/`): in-memory CA store
//! - **Service Layer** (`service/`): the import pipeline
//!
//! ## Failure isolation
//!
//! Every file is independent. A file is deleted once durably absorbed and
//! left on disk on any failure, so a crashed or partial batch is re-run
//! safely: each apply step is idempotent.
//!
//! ## Trust boundary
//!
//! Without a configured signing CA, container files are taken as already
//! trusted and no signature is checked. That mode widens the trust boundary
//! to whoever can write into the certificate directory.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::InMemoryAuthoritativeStore;
pub use domain::config::ReaderConfig;
pub use domain::entities::{CaInfo, LimitedCertificate, RevocationUpdate};
pub use domain::errors::{ImportError, ReaderError, StoreError};
pub use domain::report::{FileKind, FileReport, ImportOutcome, ImportReport, ImportSummary};
pub use ports::inbound::CertificateCrlReaderApi;
pub use ports::outbound::AuthoritativeStore;
pub use service::CertificateCrlReader;
