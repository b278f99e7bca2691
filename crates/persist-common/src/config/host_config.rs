//! Host configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `persist.toml`, then `PERSIST_*` environment variables using `__` between
//! sections (`PERSIST_MAINTENANCE__OPTIMISE_INTERVAL_SECS=3600`).
//! The connection URL is not part of this file; providers read it themselves.

use std::collections::HashMap;
use std::time::Duration;

use persist_core::DatabaseConfigurationOptions;
use serde::Deserialize;
use tracing::Level;

use crate::telemetry::TracingConfig;

const ENV_PREFIX: &str = "PERSIST";
const CONFIG_FILE: &str = "persist";

/// Main host configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub database: DatabaseConfigurationOptions,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scheduled maintenance settings
#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceConfig {
    #[serde(default = "default_optimise_interval_secs")]
    pub optimise_interval_secs: u64,
    /// Run one optimisation immediately instead of waiting a full interval
    #[serde(default)]
    pub optimise_on_start: bool,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            optimise_interval_secs: default_optimise_interval_secs(),
            optimise_on_start: false,
        }
    }
}

impl MaintenanceConfig {
    #[must_use]
    pub fn optimise_interval(&self) -> Duration {
        Duration::from_secs(self.optimise_interval_secs)
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Tracing preset for these settings
    pub fn tracing_config(&self) -> Result<TracingConfig, ConfigError> {
        let level: Level = self
            .level
            .parse()
            .map_err(|_| ConfigError::InvalidValue("telemetry.level", self.level.clone()))?;

        let base = if self.json {
            TracingConfig::production()
        } else if level == Level::DEBUG || level == Level::TRACE {
            TracingConfig::development()
        } else {
            TracingConfig::default()
        };

        Ok(TracingConfig { level, ..base })
    }
}

// Default value functions
fn default_optimise_interval_secs() -> u64 {
    86_400 // 24 hours
}

fn default_log_level() -> String {
    "info".to_string()
}

impl HostConfig {
    /// Load configuration from `.env`, `persist.toml` and the environment
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or a value is invalid
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_sources(Some(CONFIG_FILE), None)
    }

    /// Load from an optional config file and an optional fixed variable map
    ///
    /// With `vars = None` the process environment is read.
    pub fn from_sources(
        file: Option<&str>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.maintenance.optimise_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "maintenance.optimise_interval_secs",
                "0".to_string(),
            ));
        }
        if self.database.database_type.trim().is_empty() {
            return Err(ConfigError::MissingVar("database.database_type"));
        }
        self.telemetry.tracing_config()?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use persist_core::LockingBehavior;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_sources(None, Some(HashMap::new())).unwrap();
        assert_eq!(config.database.database_type, "postgres");
        assert_eq!(config.database.locking_behavior, LockingBehavior::NoLock);
        assert_eq!(config.maintenance.optimise_interval(), Duration::from_secs(86_400));
        assert!(!config.maintenance.optimise_on_start);
        assert_eq!(config.telemetry.level, "info");
        assert!(!config.telemetry.json);
    }

    #[test]
    fn test_environment_overrides() {
        let config = HostConfig::from_sources(
            None,
            Some(vars(&[
                ("PERSIST_DATABASE__DATABASE_TYPE", "custom"),
                ("PERSIST_DATABASE__LOCKING_BEHAVIOR", "optimistic"),
                ("PERSIST_MAINTENANCE__OPTIMISE_INTERVAL_SECS", "3600"),
                ("PERSIST_MAINTENANCE__OPTIMISE_ON_START", "true"),
                ("PERSIST_TELEMETRY__JSON", "true"),
            ])),
        )
        .unwrap();

        assert_eq!(config.database.database_type, "custom");
        assert_eq!(config.database.locking_behavior, LockingBehavior::Optimistic);
        assert_eq!(config.maintenance.optimise_interval_secs, 3600);
        assert!(config.maintenance.optimise_on_start);
        assert!(config.telemetry.json);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = HostConfig::from_sources(
            None,
            Some(vars(&[("PERSIST_MAINTENANCE__OPTIMISE_INTERVAL_SECS", "0")])),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(..)));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = HostConfig::from_sources(
            None,
            Some(vars(&[("PERSIST_TELEMETRY__LEVEL", "loud")])),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("telemetry.level", _)));
    }

    #[test]
    fn test_tracing_config_from_telemetry() {
        let telemetry = TelemetryConfig {
            level: "debug".to_string(),
            json: true,
        };
        let tracing = telemetry.tracing_config().unwrap();
        assert_eq!(tracing.level, Level::DEBUG);
        assert!(tracing.json);
        assert!(!tracing.file_line);
    }

    #[test]
    fn test_verbose_text_logging_uses_development_preset() {
        let telemetry = TelemetryConfig {
            level: "trace".to_string(),
            json: false,
        };
        let tracing = telemetry.tracing_config().unwrap();
        assert_eq!(tracing.level, Level::TRACE);
        assert!(tracing.span_events);
        assert!(tracing.thread_names);
    }
}
