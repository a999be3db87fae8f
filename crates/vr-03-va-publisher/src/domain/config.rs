//! # Publisher Configuration
//!
//! Typed replacement for the publisher's persisted property set. Every key is
//! known up front; an unknown key is a configuration error at load time.
//!
//! # Config File Format
//!
//! ```toml
//! protect = false
//! storeCert = true
//! storeCRL = true
//! onlyPublishRevoked = false
//! noMetadata = false
//! dataSource = "OcspDS"
//! ```

use serde::Deserialize;
use shared_types::{parse_properties, property_bool, ConfigError};
use std::fs;
use std::path::Path;

/// Default external store handle.
pub const DEFAULT_DATA_SOURCE: &str = "OcspDS";

/// Read-only policy captured by the publisher at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PublisherConfig {
    /// Integrity-protect rows on write. Carried through to the store; not
    /// implemented by the publisher itself.
    pub protect: bool,

    /// Include the DER certificate in certificate rows (default: true).
    pub store_cert: bool,

    /// Publish CRLs at all (default: true).
    #[serde(rename = "storeCRL")]
    pub store_crl: bool,

    /// Replicate only revoked, or just un-revoked, certificates (default: false).
    pub only_publish_revoked: bool,

    /// Redact owner and subject metadata before it leaves the CA (default: false).
    pub no_metadata: bool,

    /// Identifier of the target external store.
    pub data_source: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            protect: false,
            store_cert: true,
            store_crl: true,
            only_publish_revoked: false,
            no_metadata: false,
            data_source: DEFAULT_DATA_SOURCE.to_string(),
        }
    }
}

impl PublisherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_protect(mut self, protect: bool) -> Self {
        self.protect = protect;
        self
    }

    pub fn with_store_cert(mut self, store_cert: bool) -> Self {
        self.store_cert = store_cert;
        self
    }

    pub fn with_store_crl(mut self, store_crl: bool) -> Self {
        self.store_crl = store_crl;
        self
    }

    pub fn with_only_publish_revoked(mut self, only_revoked: bool) -> Self {
        self.only_publish_revoked = only_revoked;
        self
    }

    pub fn with_no_metadata(mut self, no_metadata: bool) -> Self {
        self.no_metadata = no_metadata;
        self
    }

    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = data_source.into();
        self
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let message = e.message().to_string();
            match message.strip_prefix("unknown field `") {
                Some(rest) => ConfigError::UnknownKey(
                    rest.split('`').next().unwrap_or_default().to_string(),
                ),
                None => ConfigError::Parse(message),
            }
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

    /// Parse configuration from a `key=value` property set.
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in parse_properties(text)? {
            match key.as_str() {
                "protect" => config.protect = property_bool(&value),
                "storeCert" => config.store_cert = property_bool(&value),
                "storeCRL" => config.store_crl = property_bool(&value),
                "onlyPublishRevoked" => config.only_publish_revoked = property_bool(&value),
                "noMetadata" => config.no_metadata = property_bool(&value),
                "dataSource" => {
                    if value.is_empty() {
                        return Err(ConfigError::InvalidValue { key, value });
                    }
                    config.data_source = value;
                }
                _ => return Err(ConfigError::UnknownKey(key)),
            }
        }
        Ok(config)
    }
}
