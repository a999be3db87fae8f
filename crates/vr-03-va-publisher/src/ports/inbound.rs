//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::PublishAck;
use crate::domain::errors::PublishError;
use shared_types::{CertificateStatus, CrlRecord, ReplicationEvent, RevocationReason};

/// VA publisher API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait VaPublisherApi: Send + Sync {
    /// Replicate one certificate change to the external store.
    fn publish(&self, event: ReplicationEvent) -> Result<PublishAck, PublishError>;

    /// Replicate one CRL to the external store.
    fn store_crl(&self, crl: CrlRecord) -> Result<PublishAck, PublishError>;

    /// Whether a record with this status/reason passes the publish gate.
    fn will_publish(&self, status: CertificateStatus, reason: RevocationReason) -> bool;

    /// Issue a harmless probe query against the external store.
    fn test_connection(&self) -> Result<(), PublishError>;
}
