//! Host-side database configuration handed to providers at initialisation

use serde::Deserialize;

/// How the host serialises write access to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LockingBehavior {
    #[default]
    NoLock,
    Pessimistic,
    Optimistic,
}

/// Database section of the host configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfigurationOptions {
    /// Registry key of the provider to use
    #[serde(default = "default_database_type")]
    pub database_type: String,
    #[serde(default)]
    pub locking_behavior: LockingBehavior,
}

impl Default for DatabaseConfigurationOptions {
    fn default() -> Self {
        Self {
            database_type: default_database_type(),
            locking_behavior: LockingBehavior::default(),
        }
    }
}

fn default_database_type() -> String {
    "postgres".to_string()
}
