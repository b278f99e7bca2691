//! Session traits (ports) - the only backend capabilities a provider relies on
//!
//! A session is released when it is dropped, so every exit path of a caller
//! (success, error, cancellation) gives the connection back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::options::RetryPolicy;

/// A live backend session
#[async_trait]
pub trait Session: Send {
    /// Execute a raw statement, returning the number of affected rows
    async fn execute_raw(&mut self, sql: &str) -> ProviderResult<u64>;
}

/// Hands out sessions from a pool
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Acquire a session, suspending while the pool is exhausted
    async fn create_session(&self) -> ProviderResult<Box<dyn Session>>;
}

/// Opens a session factory for a registered engine
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, retry_policy: RetryPolicy) -> ProviderResult<Arc<dyn SessionFactory>>;
}
