//! Structured logging setup.
//!
//! Events are emitted with consistent fields:
//! - `timestamp`, `level`, `target`
//! - `subsystem`: component name (publisher, reader, verifier)
//! - `file`: drop-directory file name for importer events
//! - Additional context fields (fingerprint, issuer, data source)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.log_level.clone(),
        reason: e.to_string(),
    })
}

/// Install the global tracing subscriber.
///
/// Fails with `AlreadyInitialized` when a subscriber is already installed,
/// so embedding hosts that set up their own logging are left untouched.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let installed = match (config.console_output, config.json_logs) {
        (true, true) => {
            // JSON output for containers/production
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .try_init()
        }
        (true, false) => {
            // Pretty output for development
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        (false, _) => tracing_subscriber::registry().with(env_filter).try_init(),
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );
    Ok(())
}

/// Emit an event tagged with the owning subsystem.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Emit an importer event about a single drop-directory file.
#[macro_export]
macro_rules! log_file_event {
    ($level:ident, $subsystem:expr, $msg:expr, $file:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            file = %$file,
            $($($field)*,)?
            $msg
        )
    };
}
