//! Host configuration

mod host_config;

pub use host_config::{ConfigError, HostConfig, MaintenanceConfig, TelemetryConfig};
