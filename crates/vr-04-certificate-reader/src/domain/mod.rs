//! Domain layer: configuration, store entities and import outcomes.

pub mod config;
pub mod entities;
pub mod errors;
pub mod report;
