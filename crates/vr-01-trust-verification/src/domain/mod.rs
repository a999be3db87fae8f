//! Domain layer: pure verification logic over openssl types.

pub mod entities;
pub mod envelope;
pub mod errors;
