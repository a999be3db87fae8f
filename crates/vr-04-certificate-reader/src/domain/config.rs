//! # Reader Configuration
//!
//! ```toml
//! certificateDirectory = "/var/lib/va-relay/certs"
//! crlDirectory = "/var/lib/va-relay/crls"
//! signingCaId = 1652389506
//! ```
//!
//! An empty or absent directory skips that half of the batch. An absent
//! signing CA id, or `-1`, disables signature enforcement.

use serde::Deserialize;
use shared_types::{parse_properties, ConfigError};
use std::fs;
use std::path::{Path, PathBuf};

/// Property value meaning "no signing CA".
pub const NO_SIGNING_CA: i32 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    pub certificate_directory: Option<PathBuf>,
    pub crl_directory: Option<PathBuf>,
    pub signing_ca_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct ReaderConfigFile {
    certificate_directory: Option<String>,
    crl_directory: Option<String>,
    signing_ca_id: Option<i32>,
}

fn directory(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn signing_ca(id: Option<i32>) -> Option<i32> {
    id.filter(|id| *id != NO_SIGNING_CA)
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_certificate_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.certificate_directory = Some(dir.into());
        self
    }

    pub fn with_crl_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.crl_directory = Some(dir.into());
        self
    }

    pub fn with_signing_ca_id(mut self, ca_id: i32) -> Self {
        self.signing_ca_id = signing_ca(Some(ca_id));
        self
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ReaderConfigFile = toml::from_str(content).map_err(|e| {
            let message = e.message().to_string();
            match message.strip_prefix("unknown field `") {
                Some(rest) => ConfigError::UnknownKey(
                    rest.split('`').next().unwrap_or_default().to_string(),
                ),
                None => ConfigError::Parse(message),
            }
        })?;
        Ok(Self {
            certificate_directory: directory(file.certificate_directory),
            crl_directory: directory(file.crl_directory),
            signing_ca_id: signing_ca(file.signing_ca_id),
        })
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse the worker property set (`certificate.directory`, `crl.directory`,
    /// `signing.ca.id`).
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in parse_properties(text)? {
            match key.as_str() {
                "certificate.directory" => config.certificate_directory = directory(Some(value)),
                "crl.directory" => config.crl_directory = directory(Some(value)),
                "signing.ca.id" => {
                    config.signing_ca_id = if value.is_empty() {
                        None
                    } else {
                        let id = value
                            .parse::<i32>()
                            .map_err(|_| ConfigError::InvalidValue {
                                key: key.clone(),
                                value: value.clone(),
                            })?;
                        signing_ca(Some(id))
                    };
                }
                _ => return Err(ConfigError::UnknownKey(key)),
            }
        }
        Ok(config)
    }
}
