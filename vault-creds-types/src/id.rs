//! The identifier a provider reports to its caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier used by the token-file provider, which is not backed by an
/// addressable resource. Every bound token-file provider reports this value.
pub const TOKEN_FILE_PROVIDER_UID: &str = "token-file-provider";

/// Opaque identifier distinguishing one provider instance from another.
///
/// Just a string underneath. Network-backed providers use the UID of the
/// resource they were built from; the token-file provider uses a literal.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderUid(pub String);

impl ProviderUid {
    /// Create a new UID from anything that converts to String.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fixed UID of the token-file provider.
    pub fn token_file() -> Self {
        Self::new(TOKEN_FILE_PROVIDER_UID)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the unbound, empty UID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProviderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderUid {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ProviderUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}
