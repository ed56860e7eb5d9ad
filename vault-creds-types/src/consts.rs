//! Credential-map keys and auth method identifiers.
//!
//! Both sets are closed enumerations. The `&str` constants at the bottom of
//! this module carry the same values for callers that work with raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string did not name any variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Closed string enumerations with a fixed wire spelling per variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire spelling of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

string_enum!(
    /// Keys a provider uses in the credential map it hands back.
    CredentialKey, "credential key", {
        /// Role ID for AppRole login.
        AppRole => "id",
        /// Signed assertion for JWT login.
        Jwt => "jwt",
        /// Pre-issued Vault token.
        Token => "token",
    }
);

string_enum!(
    /// How a provider authenticates to Vault. Selects the provider variant.
    ProviderMethod, "auth method", {
        /// Kubernetes service account token exchange.
        Kubernetes => "kubernetes",
        /// Signed JWT exchange.
        Jwt => "jwt",
        /// Role ID / secret ID exchange.
        AppRole => "appRole",
        /// AWS IAM exchange.
        Aws => "aws",
        /// GCP IAM exchange.
        Gcp => "gcp",
        /// Static token read from a local file.
        Token => "token",
    }
);

/// Credential-map key for AppRole login.
pub const PROVIDER_SECRET_KEY_APP_ROLE: &str = CredentialKey::AppRole.as_str();
/// Credential-map key for JWT login.
pub const PROVIDER_SECRET_KEY_JWT: &str = CredentialKey::Jwt.as_str();
/// Credential-map key for token auth.
pub const PROVIDER_SECRET_KEY_TOKEN: &str = CredentialKey::Token.as_str();

/// Method identifier for Kubernetes auth.
pub const PROVIDER_METHOD_KUBERNETES: &str = ProviderMethod::Kubernetes.as_str();
/// Method identifier for JWT auth.
pub const PROVIDER_METHOD_JWT: &str = ProviderMethod::Jwt.as_str();
/// Method identifier for AppRole auth.
pub const PROVIDER_METHOD_APP_ROLE: &str = ProviderMethod::AppRole.as_str();
/// Method identifier for AWS auth.
pub const PROVIDER_METHOD_AWS: &str = ProviderMethod::Aws.as_str();
/// Method identifier for GCP auth.
pub const PROVIDER_METHOD_GCP: &str = ProviderMethod::Gcp.as_str();
/// Method identifier for token auth.
pub const PROVIDER_METHOD_TOKEN: &str = ProviderMethod::Token.as_str();
