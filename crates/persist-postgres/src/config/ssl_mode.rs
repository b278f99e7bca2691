//! SSL modes accepted in the `sslmode` query parameter

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgSslMode;

/// TLS negotiation mode for the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    /// libpq spelling of the mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow => "allow",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }

    /// Whether the server certificate is validated
    pub const fn verifies_certificate(self) -> bool {
        matches!(self, Self::VerifyCa | Self::VerifyFull)
    }
}

/// Error when a value is not a recognised SSL mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised sslmode: {0}")]
pub struct SslModeParseError(String);

impl FromStr for SslMode {
    type Err = SslModeParseError;

    /// Case-insensitive; accepts `verify-full`, `verify_full` and `VerifyFull`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "allow" => Ok(Self::Allow),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" | "verify_ca" | "verifyca" => Ok(Self::VerifyCa),
            "verify-full" | "verify_full" | "verifyfull" => Ok(Self::VerifyFull),
            _ => Err(SslModeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Allow => PgSslMode::Allow,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}
