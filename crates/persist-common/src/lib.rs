//! # persist-common
//!
//! Shared host utilities: layered configuration and tracing setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{ConfigError, HostConfig, MaintenanceConfig, TelemetryConfig};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
