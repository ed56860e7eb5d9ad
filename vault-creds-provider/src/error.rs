//! Errors from credential providers.

use std::path::PathBuf;
use thiserror::Error;
use vault_creds_types::{ProviderMethod, ValidationError};

/// Errors from credential providers.
///
/// Every variant reaches the caller; providers only add context on the way
/// out. The underlying cause stays reachable through
/// [`std::error::Error::source`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The selected method has no sub-configuration.
    #[error("{0} auth method not configured")]
    ConfigurationMissing(ProviderMethod),

    /// The method's sub-configuration failed structural validation.
    #[error("invalid {method} auth configuration: {source}")]
    ConfigurationInvalid {
        /// The method being configured.
        method: ProviderMethod,
        /// What validation rejected.
        #[source]
        source: ValidationError,
    },

    /// The bound token file path is empty.
    #[error("file path is empty")]
    EmptyFilePath,

    /// Reading the token file failed.
    #[error("failed to read token file {}: {source}", path.display())]
    FileUnreadable {
        /// The path that was read.
        path: PathBuf,
        /// The I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The token file has no content after trimming whitespace.
    #[error("token file {} is empty or contains only whitespace", path.display())]
    EmptyOrWhitespaceToken {
        /// The path that was read.
        path: PathBuf,
    },

    /// `get_creds` was called on a provider with no bound configuration.
    #[error("credential provider has not been initialized")]
    NotInitialized,

    /// No provider implementation exists for the method.
    #[error("unsupported auth method: {0}")]
    UnsupportedMethod(ProviderMethod),

    /// Cluster or backend communication failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CredentialError {
    /// True when the same call may succeed later without a configuration
    /// change (after the file appears, permissions are fixed, the backend
    /// recovers). The caller owns any retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FileUnreadable { .. } | Self::Backend(_))
    }
}
