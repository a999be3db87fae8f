//! Cross-subsystem integration flows.

pub mod import_flow;
pub mod publish_flow;

use std::env;
use std::sync::Once;
use vr_telemetry::{init_logging, TelemetryConfig, TelemetryError};

static LOGGING: Once = Once::new();

/// Install the workspace subscriber once per test binary.
///
/// Honors `VR_LOG_LEVEL`/`RUST_LOG`; without either only warnings are shown.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let mut config = TelemetryConfig::from_env();
        if env::var("VR_LOG_LEVEL").is_err() && env::var("RUST_LOG").is_err() {
            config = config.with_log_level("warn");
        }
        match init_logging(&config) {
            Ok(()) | Err(TelemetryError::AlreadyInitialized) => {}
            Err(e) => panic!("test logging setup failed: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the shared setup installs the subscriber and tolerates repeat calls.
    #[test]
    fn test_logging_is_installed_once() {
        init_test_logging();
        init_test_logging();

        assert_eq!(
            init_logging(&TelemetryConfig::default()),
            Err(TelemetryError::AlreadyInitialized)
        );
        assert!(tracing::dispatcher::has_been_set());
    }
}
