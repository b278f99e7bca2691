//! Provider wiring for the maintenance host

use persist_common::HostConfig;
use persist_core::{
    CancellationToken, DatabaseProvider, ProviderRegistry, ProviderResult, SessionOptionsBuilder,
};
use tracing::{info, instrument};

use crate::scheduler::run_maintenance_loop;

/// Registry with every provider this host ships
pub fn default_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    persist_postgres::register(&mut registry);
    registry
}

/// Create the configured provider and inject its session factory
///
/// # Errors
/// Returns `UnknownProvider` when no provider is registered under
/// `database.database_type`, or any error raised while connecting.
#[instrument(skip_all, fields(database_type = %config.database.database_type))]
pub async fn connect_provider(
    registry: &ProviderRegistry,
    config: &HostConfig,
) -> ProviderResult<Box<dyn DatabaseProvider>> {
    let mut provider = registry.create(&config.database.database_type)?;

    let mut options = SessionOptionsBuilder::new();
    provider.initialise(&mut options, &config.database)?;
    let options = options.build()?;

    info!(
        engine = options.engine(),
        naming_convention = ?options.naming_convention(),
        "Session options built"
    );

    provider.set_session_factory(options.connect().await?);
    Ok(provider)
}

/// Run maintenance until `cancel` fires, then run the provider's shutdown task
pub async fn run(config: HostConfig, cancel: CancellationToken) -> anyhow::Result<()> {
    let registry = default_registry();
    let provider = connect_provider(&registry, &config).await?;

    run_maintenance_loop(
        provider.as_ref(),
        config.maintenance.optimise_interval(),
        config.maintenance.optimise_on_start,
        &cancel,
    )
    .await;

    info!("Running provider shutdown task");
    provider.run_shutdown_task(&CancellationToken::new()).await?;
    Ok(())
}
