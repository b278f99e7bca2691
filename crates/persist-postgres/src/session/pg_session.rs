//! sqlx-backed sessions
//!
//! [`PgConnector`] is what the provider registers during initialisation;
//! connecting it yields a [`PgSessionFactory`] over a lazily opened pool.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use persist_core::{Connector, ProviderResult, RetryPolicy, Session, SessionFactory};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Postgres;
use tracing::{info, instrument};

use crate::config::ConnectionConfig;
use crate::error::map_db_error;

use super::retry::{is_transient, next_retry, with_retry};

/// Opens the PostgreSQL pool described by a connection config
#[derive(Clone)]
pub struct PgConnector {
    connect_options: PgConnectOptions,
    pool_options: PgPoolOptions,
}

impl fmt::Debug for PgConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConnector")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.connect_options.get_database())
            .finish_non_exhaustive()
    }
}

impl PgConnector {
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            connect_options: config.to_connect_options(),
            pool_options: config.to_pool_options(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    /// Builds the pool without opening a connection
    async fn connect(&self, retry_policy: RetryPolicy) -> ProviderResult<Arc<dyn SessionFactory>> {
        let pool = self
            .pool_options
            .clone()
            .connect_lazy_with(self.connect_options.clone());

        info!(
            host = self.connect_options.get_host(),
            port = self.connect_options.get_port(),
            max_connections = self.pool_options.get_max_connections(),
            max_retries = retry_policy.max_retry_count,
            "PostgreSQL session pool created"
        );

        Ok(Arc::new(PgSessionFactory::new(pool, retry_policy)))
    }
}

/// Session factory over a [`PgPool`]
#[derive(Clone)]
pub struct PgSessionFactory {
    pool: PgPool,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for PgSessionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSessionFactory")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl PgSessionFactory {
    pub fn new(pool: PgPool, retry_policy: RetryPolicy) -> Self {
        Self { pool, retry_policy }
    }

    /// Acquire a pooled connection, retrying transient failures
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> ProviderResult<PgSession> {
        let conn = with_retry(self.retry_policy, "acquire", || self.pool.acquire())
            .await
            .map_err(map_db_error)?;

        Ok(PgSession {
            pool: self.pool.clone(),
            conn: Some(conn),
            retry_policy: self.retry_policy,
        })
    }
}

#[async_trait]
impl SessionFactory for PgSessionFactory {
    async fn create_session(&self) -> ProviderResult<Box<dyn Session>> {
        Ok(Box::new(self.acquire().await?))
    }
}

/// A pooled connection; returned to the pool on drop
pub struct PgSession {
    pool: PgPool,
    conn: Option<PoolConnection<Postgres>>,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for PgSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSession")
            .field("connected", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}

impl PgSession {
    async fn try_execute(&mut self, sql: &str) -> Result<u64, sqlx::Error> {
        let mut conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.pool.acquire().await?,
        };

        let raw_conn: &mut sqlx::PgConnection = &mut conn;
        match sqlx::Executor::execute(raw_conn, sqlx::raw_sql(sql)).await {
            Ok(result) => {
                self.conn = Some(conn);
                Ok(result.rows_affected())
            }
            Err(error) => {
                if is_transient(&error) {
                    // Broken connections must not go back to the pool
                    drop(conn.detach());
                } else {
                    self.conn = Some(conn);
                }
                Err(error)
            }
        }
    }
}

#[async_trait]
impl Session for PgSession {
    /// Runs on the simple query protocol so maintenance commands such as
    /// `VACUUM` are accepted
    #[instrument(skip(self))]
    async fn execute_raw(&mut self, sql: &str) -> ProviderResult<u64> {
        let mut retries = 0;
        loop {
            match self.try_execute(sql).await {
                Ok(rows) => return Ok(rows),
                Err(error) => {
                    retries = next_retry(self.retry_policy, retries, "execute", error)
                        .await
                        .map_err(map_db_error)?;
                }
            }
        }
    }
}
