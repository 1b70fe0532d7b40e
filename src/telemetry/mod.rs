//! Telemetry module
//!
//! Logging only; the binary is short-lived and exposes no metrics endpoint.

mod logging;

pub use crate::config::LogFormat;
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
