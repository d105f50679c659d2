//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::http_server::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CATALOG_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("CATALOG_CLI_CONFIG_ERROR: DATABASE_URL is not set (or pass --fixture)")]
    MissingDatabaseUrl,

    #[error("CATALOG_CLI_FIXTURE_ERROR: {path}: {reason}")]
    Fixture { path: String, reason: String },

    #[error("CATALOG_CLI_STORE_ERROR: {0}")]
    Store(#[from] CatalogError),

    #[error("CATALOG_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::MissingDatabaseUrl => "CATALOG_CLI_CONFIG_ERROR",
            Self::Fixture { .. } => "CATALOG_CLI_FIXTURE_ERROR",
            Self::Store(_) => "CATALOG_CLI_STORE_ERROR",
            Self::Io(_) => "CATALOG_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::MissingDatabaseUrl;
        assert!(err.to_string().starts_with(err.code_str()));

        let err = CliError::from(ConfigError::Invalid("port must be > 0".to_string()));
        assert_eq!(err.code_str(), "CATALOG_CLI_CONFIG_ERROR");
        assert!(err.to_string().contains("port must be > 0"));
    }
}
