//! Provider errors - the error taxonomy shared by every backend adapter

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by database providers and their collaborators
#[derive(Debug, Error)]
pub enum ProviderError {
    // =========================================================================
    // Fatal at construction
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown database provider: {0}")]
    UnknownProvider(String),

    // =========================================================================
    // Fatal to a single call
    // =========================================================================
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Backend execution error: {0}")]
    BackendExecution(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an argument error
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Get a stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            Self::Argument(_) => "ARGUMENT_ERROR",
            Self::BackendExecution(_) => "BACKEND_EXECUTION_ERROR",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Check if the host must not proceed after this error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnknownProvider(_))
    }

    /// Check if this error came from cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
