//! # Inbound Ports (Driving Ports / API)

use crate::domain::container::Container;
use crate::domain::errors::CodecError;

/// Container codec API.
///
/// `decode` must never return a partially populated container.
pub trait ContainerCodec: Send + Sync {
    fn encode(&self, container: &Container) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Container, CodecError>;
}
