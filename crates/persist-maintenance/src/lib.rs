//! # persist-maintenance
//!
//! Host process for the persistence layer: resolves the configured provider,
//! connects it and runs its scheduled optimisation until shutdown.

pub mod host;
pub mod scheduler;

pub use host::{connect_provider, default_registry, run};
pub use scheduler::{run_maintenance_loop, MaintenanceReport};
