//! # Container Codec Subsystem (VR-02)
//!
//! Structural (non-cryptographic) encoding of the transport container that
//! carries a certificate or revocation record across the drop directory.
//!
//! ## Wire format
//!
//! ```text
//! +--------+---------+---------------------------+
//! | "VRSC" | version | bincode(Container), fixint |
//! | 4 B    | 1 B     | variable                   |
//! +--------+---------+---------------------------+
//! ```
//!
//! Decoding is all-or-nothing: a container is returned only when every field
//! decoded and no trailing bytes remain.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::bincode::BincodeContainerCodec;
pub use domain::container::Container;
pub use domain::errors::CodecError;
pub use ports::inbound::ContainerCodec;
