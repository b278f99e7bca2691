//! Database provider trait - the lifecycle contract every backend implements
//!
//! The host drives a provider through
//! `Constructed -> Initialised -> Active -> Disposed`. Only
//! [`DatabaseProvider::initialise`] is valid before initialisation and it is
//! called once per instance.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderResult;
use crate::model::{ConventionBuilder, ModelDefinition};
use crate::options::{DatabaseConfigurationOptions, SessionOptionsBuilder};

use super::{Session, SessionFactory};

#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Session factory injected by the host, if any
    fn session_factory(&self) -> Option<Arc<dyn SessionFactory>>;

    /// Inject the session factory built from this provider's options
    fn set_session_factory(&mut self, factory: Arc<dyn SessionFactory>);

    /// Register the provider's engine, retry policy and naming convention
    fn initialise(
        &self,
        options: &mut SessionOptionsBuilder,
        database_configuration: &DatabaseConfigurationOptions,
    ) -> ProviderResult<()>;

    /// Run periodic backend maintenance
    async fn run_scheduled_optimisation(&self, cancel: &CancellationToken) -> ProviderResult<()>;

    /// Release backend resources when the host stops
    async fn run_shutdown_task(&self, cancel: &CancellationToken) -> ProviderResult<()>;

    /// Take a fast backup before migrations
    ///
    /// Returns the backup key; an empty key means no artifact was produced.
    async fn migration_backup_fast(&self, cancel: &CancellationToken) -> ProviderResult<String>;

    /// Restore a backup taken by [`DatabaseProvider::migration_backup_fast`]
    async fn restore_backup_fast(&self, key: &str, cancel: &CancellationToken) -> ProviderResult<()>;

    /// Delete a backup taken by [`DatabaseProvider::migration_backup_fast`]
    async fn delete_backup(&self, key: &str) -> ProviderResult<()>;

    /// Remove every row from the named tables
    ///
    /// `None` is an argument error; an empty slice is a no-op.
    async fn purge_database(
        &self,
        session: &mut dyn Session,
        table_names: Option<&[String]>,
    ) -> ProviderResult<()>;

    /// Apply backend defaults to the model
    fn on_model_creating(&self, model: &mut ModelDefinition);

    /// Add backend-specific model conventions
    fn configure_conventions(&self, conventions: &mut ConventionBuilder);
}
