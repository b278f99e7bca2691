//! # persist-core
//!
//! Backend-neutral contract between a host persistence layer and its database
//! providers. The host only talks to [`DatabaseProvider`], [`SessionFactory`]
//! and [`Session`]; backend crates implement them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use persist_core::{DatabaseConfigurationOptions, ProviderRegistry, SessionOptionsBuilder};
//!
//! async fn example(registry: &ProviderRegistry) -> persist_core::ProviderResult<()> {
//!     let mut provider = registry.create("postgres")?;
//!     let mut options = SessionOptionsBuilder::new();
//!     provider.initialise(&mut options, &DatabaseConfigurationOptions::default())?;
//!     provider.set_session_factory(options.build()?.connect().await?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod options;
pub mod registry;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{ProviderError, ProviderResult};
pub use model::{
    ColumnType, ConventionBuilder, DateTimeKind, EntityDefinition, ModelConvention,
    ModelDefinition, NamingConvention, PropertyDefinition,
};
pub use options::{
    DatabaseConfigurationOptions, LockingBehavior, RetryPolicy, SessionOptions,
    SessionOptionsBuilder,
};
pub use registry::ProviderRegistry;
pub use traits::{Connector, DatabaseProvider, Session, SessionFactory};

pub use tokio_util::sync::CancellationToken;
