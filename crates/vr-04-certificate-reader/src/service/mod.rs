//! # Certificate/CRL Reader Service
//!
//! Implements `CertificateCrlReaderApi` on top of an `AuthoritativeStore`,
//! a trust verifier and a container codec.
//!
//! ## Flow per file
//!
//! 1. Read bytes
//! 2. Certificates: verify and unwrap (when a chain is given), decode,
//!    resolve the issuing CA, apply. CRLs: parse, resolve the issuing CA,
//!    skip duplicates, store.
//! 3. Delete the file once absorbed; leave it on any failure
//!
//! Files are visited in name order. Subdirectories are ignored.

mod certificates;
mod crls;

use crate::domain::config::ReaderConfig;
use crate::domain::errors::{ImportError, ReaderError};
use crate::domain::report::{FileKind, FileReport, ImportOutcome, ImportReport};
use crate::ports::inbound::CertificateCrlReaderApi;
use crate::ports::outbound::AuthoritativeStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use vr_01_trust_verification::{TrustVerificationApi, TrustVerificationService, TrustedChain};
use vr_02_container_codec::{BincodeContainerCodec, ContainerCodec};
use vr_telemetry::log_file_event;

const SUBSYSTEM: &str = "reader";

/// The Certificate/CRL Reader Service.
pub struct CertificateCrlReader<S, V = TrustVerificationService, C = BincodeContainerCodec>
where
    S: AuthoritativeStore,
    V: TrustVerificationApi,
    C: ContainerCodec,
{
    store: S,
    verifier: V,
    codec: C,
}

impl<S: AuthoritativeStore> CertificateCrlReader<S> {
    /// Reader with the PKCS#7 verifier and the bincode container codec.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, TrustVerificationService::new(), BincodeContainerCodec::new())
    }
}

impl<S, V, C> CertificateCrlReader<S, V, C>
where
    S: AuthoritativeStore,
    V: TrustVerificationApi,
    C: ContainerCodec,
{
    pub fn new(store: S, verifier: V, codec: C) -> Self {
        Self {
            store,
            verifier,
            codec,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn import_directory<F>(&self, dir: &Path, kind: FileKind, report: &mut ImportReport, apply: F)
    where
        F: Fn(&[u8]) -> Result<ImportOutcome, ImportError>,
    {
        let files = match list_files(dir) {
            Ok(files) => files,
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "[vr-04] Drop directory not readable");
                report.directory_errors.push((dir.to_path_buf(), e.to_string()));
                return;
            }
        };
        debug!(dir = %dir.display(), ?kind, files = files.len(), "[vr-04] Scanning drop directory");

        for path in files {
            let result = fs::read(&path)
                .map_err(|e| ImportError::Read(e.to_string()))
                .and_then(|bytes| apply(&bytes));

            let file_report = match result {
                Ok(outcome) => {
                    consume(&path);
                    FileReport::succeeded(path, kind, outcome)
                }
                Err(e) => {
                    log_failure(&path, &e);
                    FileReport::failed(path, kind, e)
                }
            };
            report.files.push(file_report);
        }
    }
}

fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn consume(path: &Path) {
    // The data is already in the store; a leftover file is re-applied idempotently.
    if let Err(e) = fs::remove_file(path) {
        log_file_event!(warn, SUBSYSTEM, "[vr-04] Imported file could not be removed", path.display(), error = %e);
    }
}

fn log_failure(path: &Path, err: &ImportError) {
    match err {
        ImportError::Read(_) => {
            log_file_event!(warn, SUBSYSTEM, "[vr-04] File could not be read, skipped", path.display(), error = %err);
        }
        _ => {
            log_file_event!(error, SUBSYSTEM, "[vr-04] File not imported, left on disk", path.display(), error = %err);
        }
    }
}

fn check_directory(dir: &Path) -> Result<(), ReaderError> {
    let metadata = fs::metadata(dir).map_err(|_| ReaderError::DirectoryMissing(dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(ReaderError::NotADirectory(dir.to_path_buf()));
    }
    if metadata.permissions().readonly() {
        return Err(ReaderError::DirectoryNotWritable(dir.to_path_buf()));
    }
    Ok(())
}

impl<S, V, C> CertificateCrlReaderApi for CertificateCrlReader<S, V, C>
where
    S: AuthoritativeStore,
    V: TrustVerificationApi,
    C: ContainerCodec,
{
    fn import_batch(
        &self,
        certificate_dir: Option<&Path>,
        crl_dir: Option<&Path>,
        chain: Option<&TrustedChain>,
    ) -> ImportReport {
        let mut report = ImportReport::default();

        if let Some(dir) = certificate_dir {
            if chain.is_none() {
                warn!(dir = %dir.display(), "[vr-04] No signing CA configured, container signatures are not checked");
            }
            self.import_directory(dir, FileKind::Certificate, &mut report, |bytes| {
                self.import_certificate_file(bytes, chain)
            });
        }
        if let Some(dir) = crl_dir {
            self.import_directory(dir, FileKind::Crl, &mut report, |bytes| {
                self.import_crl_file(bytes)
            });
        }

        info!(summary = %report.summary(), "[vr-04] Import batch finished");
        report
    }

    fn run(&self, config: &ReaderConfig) -> Result<ImportReport, ReaderError> {
        for dir in [&config.certificate_directory, &config.crl_directory]
            .into_iter()
            .flatten()
        {
            check_directory(dir)?;
        }

        let chain = match config.signing_ca_id {
            Some(ca_id) => {
                let ca = self
                    .store
                    .find_ca_by_id(ca_id)?
                    .ok_or(ReaderError::SigningCaUnknown(ca_id))?;
                if ca.certificate_chain.is_empty() {
                    return Err(ReaderError::SigningCaChain {
                        ca_id,
                        reason: "no certificates".to_string(),
                    });
                }
                let chain = TrustedChain::from_der_certificates(&ca.certificate_chain).map_err(
                    |e| ReaderError::SigningCaChain {
                        ca_id,
                        reason: e.to_string(),
                    },
                )?;
                debug!(ca_id, subject = %ca.subject_dn, chain = ?chain, "[vr-04] Signing CA resolved");
                Some(chain)
            }
            None => None,
        };

        Ok(self.import_batch(
            config.certificate_directory.as_deref(),
            config.crl_directory.as_deref(),
            chain.as_ref(),
        ))
    }
}
