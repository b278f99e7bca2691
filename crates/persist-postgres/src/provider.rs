//! PostgreSQL implementation of DatabaseProvider

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use persist_core::{
    CancellationToken, ConventionBuilder, DatabaseConfigurationOptions, DatabaseProvider,
    DateTimeKind, ModelDefinition, NamingConvention, ProviderError, ProviderResult, RetryPolicy,
    Session, SessionFactory, SessionOptionsBuilder,
};
use tracing::{debug, info, instrument, warn};

use crate::config::{ConnectionConfig, ConnectionConfigBuilder, EnvSource, ProcessEnv};
use crate::session::PgConnector;
use crate::sql;

/// Database provider backed by PostgreSQL
///
/// Backups are left to external tooling; the backup hooks log a warning and
/// do nothing.
pub struct PostgresDatabaseProvider {
    config: ConnectionConfig,
    session_factory: Option<Arc<dyn SessionFactory>>,
}

impl fmt::Debug for PostgresDatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabaseProvider")
            .field("config", &self.config)
            .field("has_session_factory", &self.session_factory.is_some())
            .finish()
    }
}

impl PostgresDatabaseProvider {
    /// Registry key used in the host configuration
    pub const DATABASE_TYPE: &'static str = "postgres";

    /// Engine name registered with the session options
    pub const ENGINE: &'static str = "postgresql";

    /// Retry policy for transient failures
    pub const RETRY_POLICY: RetryPolicy = RetryPolicy::new(5, Duration::from_secs(10));

    /// Create a provider from an already built configuration
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            session_factory: None,
        }
    }

    /// Create a provider from the process environment
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_source(&ProcessEnv)
    }

    /// Create a provider from the given environment source
    pub fn from_source<E: EnvSource + ?Sized>(env: &E) -> ProviderResult<Self> {
        ConnectionConfigBuilder::build(env).map(Self::new)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    async fn execute_raw_sql(&self, statement: &str, cancel: &CancellationToken) -> ProviderResult<()> {
        let Some(factory) = self.session_factory.as_ref() else {
            debug!("No session factory registered, skipping statement");
            return Ok(());
        };

        // The session lives inside this future, so cancellation drops it too
        let work = async {
            let mut session = factory.create_session().await?;
            session.execute_raw(statement).await
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = work => result.map(|_| ()),
        }
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabaseProvider {
    fn session_factory(&self) -> Option<Arc<dyn SessionFactory>> {
        self.session_factory.clone()
    }

    fn set_session_factory(&mut self, factory: Arc<dyn SessionFactory>) {
        self.session_factory = Some(factory);
    }

    fn initialise(
        &self,
        options: &mut SessionOptionsBuilder,
        database_configuration: &DatabaseConfigurationOptions,
    ) -> ProviderResult<()> {
        info!(
            host = %self.config.host(),
            port = self.config.port(),
            database = %self.config.database(),
            locking_behavior = ?database_configuration.locking_behavior,
            "Using PostgreSQL database provider from DATABASE_URL"
        );

        options
            .use_engine(Self::ENGINE, Arc::new(PgConnector::new(&self.config)))
            .enable_retry_on_failure(Self::RETRY_POLICY)
            .use_naming_convention(NamingConvention::SnakeCase);

        Ok(())
    }

    #[instrument(skip_all)]
    async fn run_scheduled_optimisation(&self, cancel: &CancellationToken) -> ProviderResult<()> {
        self.execute_raw_sql(sql::VACUUM_ANALYZE, cancel).await
    }

    async fn run_shutdown_task(&self, _cancel: &CancellationToken) -> ProviderResult<()> {
        Ok(())
    }

    async fn migration_backup_fast(&self, _cancel: &CancellationToken) -> ProviderResult<String> {
        warn!(
            "Migration backup is not implemented for the PostgreSQL provider. External database backups are recommended."
        );
        Ok(String::new())
    }

    async fn restore_backup_fast(&self, key: &str, _cancel: &CancellationToken) -> ProviderResult<()> {
        warn!(
            key = key,
            "Backup restore was requested for the PostgreSQL provider and is not implemented"
        );
        Ok(())
    }

    async fn delete_backup(&self, _key: &str) -> ProviderResult<()> {
        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn purge_database(
        &self,
        session: &mut dyn Session,
        table_names: Option<&[String]>,
    ) -> ProviderResult<()> {
        let table_names =
            table_names.ok_or_else(|| ProviderError::argument("table_names must not be null"))?;

        let Some(statement) = sql::truncate_tables(table_names) else {
            return Ok(());
        };

        session.execute_raw(&statement).await?;
        info!(tables = table_names.len(), "Database tables purged");
        Ok(())
    }

    fn on_model_creating(&self, model: &mut ModelDefinition) {
        model.set_default_date_time_kind(DateTimeKind::Utc);
    }

    fn configure_conventions(&self, _conventions: &mut ConventionBuilder) {}
}
