//! # persist-postgres
//!
//! PostgreSQL database provider built on SQLx.
//!
//! ## Overview
//!
//! This crate implements the `persist-core` provider contract for
//! PostgreSQL. It handles:
//!
//! - Connection settings derived from `DATABASE_URL`
//! - Pooled sessions with transient-failure retry
//! - Scheduled `VACUUM ANALYZE` and table purges
//!
//! ## Usage
//!
//! ```rust,ignore
//! use persist_core::{DatabaseConfigurationOptions, ProviderRegistry, SessionOptionsBuilder};
//!
//! async fn example() -> persist_core::ProviderResult<()> {
//!     let mut registry = ProviderRegistry::new();
//!     persist_postgres::register(&mut registry);
//!
//!     let mut provider = registry.create("postgres")?;
//!     let mut options = SessionOptionsBuilder::new();
//!     provider.initialise(&mut options, &DatabaseConfigurationOptions::default())?;
//!     provider.set_session_factory(options.build()?.connect().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod session;
pub mod sql;

use persist_core::{DatabaseProvider, ProviderRegistry};

// Re-export commonly used types
pub use config::{
    ConnectionConfig, ConnectionConfigBuilder, EnvSource, ProcessEnv, SslMode, DATABASE_URL_VAR,
};
pub use provider::PostgresDatabaseProvider;
pub use session::{PgConnector, PgSession, PgSessionFactory};

/// Register the PostgreSQL provider under `"postgres"`
///
/// The provider reads `DATABASE_URL` when the registry constructs it.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(PostgresDatabaseProvider::DATABASE_TYPE, || {
        PostgresDatabaseProvider::from_env()
            .map(|provider| Box::new(provider) as Box<dyn DatabaseProvider>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_adds_postgres_key() {
        let mut registry = ProviderRegistry::new();
        register(&mut registry);

        assert!(registry.contains("postgres"));
        assert_eq!(registry.keys(), vec!["postgres"]);
    }
}
