//! Codec implementations.

pub mod bincode;
