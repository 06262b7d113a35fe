//! # MLBF Telemetry
//!
//! Log setup for filter generation jobs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mlbf_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Build generations; spans and events now reach stdout
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MLBF_SERVICE_NAME` | `mlbf` | Service name in logs |
//! | `MLBF_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `MLBF_JSON_LOGS` | `false` | JSON formatted logs |
//! | `MLBF_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(&config)
}
