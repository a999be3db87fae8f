//! # VA-Relay Telemetry
//!
//! Structured logging for the replication and import subsystems.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vr_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // Publisher and reader events are now emitted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `va-relay` | Service name attached to every event |
//! | `VR_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `VR_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `VR_CONSOLE_OUTPUT` | `true` | Write events to stdout at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}
