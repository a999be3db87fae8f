//! # Import Report
//!
//! Per-file outcomes of one batch, with counts by outcome for monitoring.

use crate::domain::errors::ImportError;
use std::fmt;
use std::path::PathBuf;

/// Which drop directory a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Certificate,
    Crl,
}

/// Result of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportOutcome {
    /// Absorbed into the store; the file was deleted.
    Imported,
    /// CRL with an already stored (issuer, number); the file was deleted.
    SkippedDuplicate,
    ReadFailed,
    VerificationFailed,
    DecodeFailed,
    CaUnknown,
    AuthorizationFailed,
    StoreFailed,
}

impl ImportOutcome {
    /// Outcomes after which the source file is removed.
    pub fn consumes_file(self) -> bool {
        matches!(self, ImportOutcome::Imported | ImportOutcome::SkippedDuplicate)
    }

    pub fn is_failure(self) -> bool {
        !self.consumes_file()
    }
}

impl From<&ImportError> for ImportOutcome {
    fn from(err: &ImportError) -> Self {
        match err {
            ImportError::Read(_) => ImportOutcome::ReadFailed,
            ImportError::Verification(_) => ImportOutcome::VerificationFailed,
            ImportError::Decode(_)
            | ImportError::CertificateParse(_)
            | ImportError::CrlParse(_) => ImportOutcome::DecodeFailed,
            ImportError::CaUnknown(_) => ImportOutcome::CaUnknown,
            ImportError::Authorization(_) => ImportOutcome::AuthorizationFailed,
            ImportError::Store(_) => ImportOutcome::StoreFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: FileKind,
    pub outcome: ImportOutcome,
    pub error: Option<ImportError>,
}

impl FileReport {
    pub fn succeeded(path: PathBuf, kind: FileKind, outcome: ImportOutcome) -> Self {
        Self {
            path,
            kind,
            outcome,
            error: None,
        }
    }

    pub fn failed(path: PathBuf, kind: FileKind, error: ImportError) -> Self {
        Self {
            path,
            kind,
            outcome: ImportOutcome::from(&error),
            error: Some(error),
        }
    }
}

/// Everything one `import_batch` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub files: Vec<FileReport>,
    /// Directories that could not be listed; their files were not visited.
    pub directory_errors: Vec<(PathBuf, String)>,
}

impl ImportReport {
    pub fn count(&self, outcome: ImportOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn count_kind(&self, kind: FileKind, outcome: ImportOutcome) -> usize {
        self.files
            .iter()
            .filter(|f| f.kind == kind && f.outcome == outcome)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_failure())
    }

    pub fn outcome_of(&self, path: &std::path::Path) -> Option<ImportOutcome> {
        self.files.iter().find(|f| f.path == path).map(|f| f.outcome)
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            imported: self.count(ImportOutcome::Imported),
            skipped_duplicate: self.count(ImportOutcome::SkippedDuplicate),
            read_failed: self.count(ImportOutcome::ReadFailed),
            verification_failed: self.count(ImportOutcome::VerificationFailed),
            decode_failed: self.count(ImportOutcome::DecodeFailed),
            ca_unknown: self.count(ImportOutcome::CaUnknown),
            authorization_failed: self.count(ImportOutcome::AuthorizationFailed),
            store_failed: self.count(ImportOutcome::StoreFailed),
        }
    }
}

/// Counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicate: usize,
    pub read_failed: usize,
    pub verification_failed: usize,
    pub decode_failed: usize,
    pub ca_unknown: usize,
    pub authorization_failed: usize,
    pub store_failed: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.imported + self.skipped_duplicate + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.read_failed
            + self.verification_failed
            + self.decode_failed
            + self.ca_unknown
            + self.authorization_failed
            + self.store_failed
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "imported={} duplicate={} read_failed={} verification_failed={} decode_failed={} \
             ca_unknown={} authorization_failed={} store_failed={}",
            self.imported,
            self.skipped_duplicate,
            self.read_failed,
            self.verification_failed,
            self.decode_failed,
            self.ca_unknown,
            self.authorization_failed,
            self.store_failed
        )
    }
}
