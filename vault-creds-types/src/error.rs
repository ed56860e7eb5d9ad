//! Structural validation errors for auth configuration.

use thiserror::Error;

/// Auth configuration is malformed or incomplete.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The token sub-configuration has an empty file path.
    #[error("empty filePath")]
    EmptyFilePath,

    /// The manifest could not be parsed.
    #[error("malformed auth manifest: {0}")]
    Parse(#[from] serde_json::Error),
}
