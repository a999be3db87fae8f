//! Domain layer: publishing policy and write planning, no I/O.

pub mod config;
pub mod entities;
pub mod errors;
pub mod policy;
