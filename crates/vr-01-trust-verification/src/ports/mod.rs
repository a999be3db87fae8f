//! Ports layer: the driving API of the verifier.

pub mod inbound;
