//! PostgreSQL sessions and transient retry

mod pg_session;
mod retry;

pub use pg_session::{PgConnector, PgSession, PgSessionFactory};
pub use retry::{is_transient, is_transient_sqlstate};
