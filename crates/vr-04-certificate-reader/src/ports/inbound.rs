//! # Inbound Ports (Driving Ports / API)

use crate::domain::config::ReaderConfig;
use crate::domain::errors::ReaderError;
use crate::domain::report::ImportReport;
use std::path::Path;
use vr_01_trust_verification::TrustedChain;

/// Certificate/CRL reader API, invoked by an external scheduler.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait CertificateCrlReaderApi: Send + Sync {
    /// Drain both drop directories once.
    ///
    /// `None` skips that directory. Without a `chain`, container files are
    /// trusted as-is. Never fails as a whole; every per-file problem lands
    /// in the report.
    fn import_batch(
        &self,
        certificate_dir: Option<&Path>,
        crl_dir: Option<&Path>,
        chain: Option<&TrustedChain>,
    ) -> ImportReport;

    /// Validate `config`, resolve the signing CA chain, then import.
    fn run(&self, config: &ReaderConfig) -> Result<ImportReport, ReaderError>;
}
