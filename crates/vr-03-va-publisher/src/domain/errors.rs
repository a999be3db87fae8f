//! # Publisher Errors

use thiserror::Error;

/// Errors reported by an external store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalStoreError {
    /// The store could not be reached (connection refused, timeout)
    #[error("External store unreachable: {0}")]
    Connectivity(String),

    /// An insert hit an existing unique key
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other store-side failure
    #[error("External store error: {0}")]
    Other(String),
}

/// Coarse classification for callers deciding whether to retry later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishErrorKind {
    /// The store was unreachable; nothing about the record is wrong.
    Connectivity,
    /// The write reached the store and was refused.
    DataIntegrity,
}

/// A publish that did not reach a final state in the external store.
///
/// Carries a redacted description of the record, never its encoded bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// `info` is absent only for a connection test, which writes no record.
    #[error("Data source {data_source} unreachable{}: {cause}", with_info(.info))]
    Connectivity {
        data_source: String,
        info: Option<String>,
        cause: String,
    },

    #[error("Write to data source {data_source} failed ({info}): {cause}")]
    Write {
        data_source: String,
        info: String,
        cause: String,
    },
}

fn with_info(info: &Option<String>) -> String {
    info.as_deref()
        .map(|info| format!(" ({})", info))
        .unwrap_or_default()
}

impl PublishError {
    pub fn kind(&self) -> PublishErrorKind {
        match self {
            PublishError::Connectivity { .. } => PublishErrorKind::Connectivity,
            PublishError::Write { .. } => PublishErrorKind::DataIntegrity,
        }
    }
}
