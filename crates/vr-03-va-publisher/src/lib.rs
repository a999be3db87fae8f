//! # VA Publisher Subsystem (VR-03)
//!
//! Replicates certificate and CRL changes from the CA store to an external
//! validation-authority store.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): publish/redaction policy, write planning
//! - **Ports Layer** (`ports/`): `VaPublisherApi` (driving), `ExternalStore` (driven)
//! - **Adapters** (`adapters/`): in-memory external store
//! - **Service Layer** (`service/`): applies planned writes with the
//!   insert/update fallbacks
//!
//! ## Idempotency
//!
//! Every write is an insert-else-update or update-else-insert against rows
//! keyed by fingerprint, so re-delivering an event converges on the same
//! row. The fallback tolerates a single concurrent racer per key; callers
//! publishing the same fingerprint from several threads must serialize
//! those calls themselves.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::{InMemoryExternalStore, StoreCall};
pub use domain::config::PublisherConfig;
pub use domain::entities::{PublishAck, WriteAction, WriteOutcome};
pub use domain::errors::{ExternalStoreError, PublishError, PublishErrorKind};
pub use domain::policy::{will_publish, HIDDEN_SUBJECT_DN};
pub use ports::inbound::VaPublisherApi;
pub use ports::outbound::ExternalStore;
pub use service::VaPublisherService;
