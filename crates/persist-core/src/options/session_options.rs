//! Session options builder - where providers register their engine
//!
//! The host creates a [`SessionOptionsBuilder`], passes it to
//! [`DatabaseProvider::initialise`](crate::traits::DatabaseProvider::initialise),
//! then builds and connects it to obtain a session factory.

use std::fmt;
use std::sync::Arc;

use crate::error::{ProviderError, ProviderResult};
use crate::model::NamingConvention;
use crate::traits::{Connector, SessionFactory};

use super::RetryPolicy;

/// Mutable options collected during provider initialisation
#[derive(Default)]
pub struct SessionOptionsBuilder {
    engine: Option<(&'static str, Arc<dyn Connector>)>,
    retry_policy: Option<RetryPolicy>,
    naming_convention: NamingConvention,
}

impl fmt::Debug for SessionOptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptionsBuilder")
            .field("engine", &self.engine.as_ref().map(|(name, _)| *name))
            .field("retry_policy", &self.retry_policy)
            .field("naming_convention", &self.naming_convention)
            .finish()
    }
}

impl SessionOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the relational engine and the connector that reaches it
    pub fn use_engine(&mut self, engine: &'static str, connector: Arc<dyn Connector>) -> &mut Self {
        self.engine = Some((engine, connector));
        self
    }

    /// Retry transient failures below the provider
    pub fn enable_retry_on_failure(&mut self, policy: RetryPolicy) -> &mut Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Choose how domain identifiers map to schema identifiers
    pub fn use_naming_convention(&mut self, convention: NamingConvention) -> &mut Self {
        self.naming_convention = convention;
        self
    }

    /// Name of the registered engine, if any
    pub fn engine(&self) -> Option<&'static str> {
        self.engine.as_ref().map(|(name, _)| *name)
    }

    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.retry_policy
    }

    pub fn naming_convention(&self) -> NamingConvention {
        self.naming_convention
    }

    /// Freeze the options
    ///
    /// Fails when no provider registered an engine.
    pub fn build(self) -> ProviderResult<SessionOptions> {
        let (engine, connector) = self
            .engine
            .ok_or_else(|| ProviderError::configuration("no database engine was registered"))?;

        Ok(SessionOptions {
            engine,
            connector,
            retry_policy: self.retry_policy.unwrap_or_else(RetryPolicy::none),
            naming_convention: self.naming_convention,
        })
    }
}

/// Frozen session options
#[derive(Clone)]
pub struct SessionOptions {
    engine: &'static str,
    connector: Arc<dyn Connector>,
    retry_policy: RetryPolicy,
    naming_convention: NamingConvention,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("engine", &self.engine)
            .field("retry_policy", &self.retry_policy)
            .field("naming_convention", &self.naming_convention)
            .finish_non_exhaustive()
    }
}

impl SessionOptions {
    pub fn engine(&self) -> &'static str {
        self.engine
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    pub fn naming_convention(&self) -> NamingConvention {
        self.naming_convention
    }

    /// Open the engine's session factory
    pub async fn connect(&self) -> ProviderResult<Arc<dyn SessionFactory>> {
        self.connector.connect(self.retry_policy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Session;
    use async_trait::async_trait;
    use std::time::Duration;

    struct NullSession;

    #[async_trait]
    impl Session for NullSession {
        async fn execute_raw(&mut self, _sql: &str) -> ProviderResult<u64> {
            Ok(0)
        }
    }

    struct NullFactory;

    #[async_trait]
    impl SessionFactory for NullFactory {
        async fn create_session(&self) -> ProviderResult<Box<dyn Session>> {
            Ok(Box::new(NullSession))
        }
    }

    struct NullConnector;

    #[async_trait]
    impl Connector for NullConnector {
        async fn connect(&self, _retry_policy: RetryPolicy) -> ProviderResult<Arc<dyn SessionFactory>> {
            Ok(Arc::new(NullFactory))
        }
    }

    #[test]
    fn test_build_without_engine_fails() {
        let err = SessionOptionsBuilder::new().build().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_build_defaults() {
        let mut builder = SessionOptionsBuilder::new();
        builder.use_engine("null", Arc::new(NullConnector));
        let options = builder.build().unwrap();

        assert_eq!(options.engine(), "null");
        assert_eq!(options.retry_policy(), RetryPolicy::none());
        assert_eq!(options.naming_convention(), NamingConvention::Identity);
    }

    #[tokio::test]
    async fn test_connect_uses_connector() {
        let mut builder = SessionOptionsBuilder::new();
        builder
            .use_engine("null", Arc::new(NullConnector))
            .enable_retry_on_failure(RetryPolicy::new(5, Duration::from_secs(10)))
            .use_naming_convention(NamingConvention::SnakeCase);
        let options = builder.build().unwrap();

        let factory = options.connect().await.unwrap();
        let mut session = factory.create_session().await.unwrap();
        assert_eq!(session.execute_raw("SELECT 1").await.unwrap(), 0);
    }
}
