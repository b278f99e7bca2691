//! Connection configuration derived from the environment

mod connection;
mod env;
mod ssl_mode;

pub use connection::{
    ConnectionConfig, ConnectionConfigBuilder, DATABASE_URL_VAR, MAX_POOL_SIZE_VAR,
    MIN_POOL_SIZE_VAR,
};
pub use env::{EnvSource, ProcessEnv};
pub use ssl_mode::{SslMode, SslModeParseError};
