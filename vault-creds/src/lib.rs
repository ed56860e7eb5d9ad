#![deny(missing_docs)]
//! # vault-creds — umbrella crate
//!
//! Single import surface for the credential providers a controller uses to
//! authenticate to Vault on behalf of `VaultAuth` resources. Re-exports the
//! vocabulary, the provider contract and the enabled variants, plus a
//! [`factory`] that picks the variant for a configuration's method and a
//! `prelude` for the happy path.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vault_creds::prelude::*;
//! # async fn run(client: &dyn ClusterClient) -> Result<(), CredentialError> {
//! let auth = Arc::new(VaultAuth::token("/var/run/secrets/vault/token"));
//! let ctx = ProviderContext::new();
//! let provider = init_credential_provider(&ctx, client, auth, "apps").await?;
//! let creds = provider.get_creds(&ctx, client).await?;
//! assert!(creds.get_key(CredentialKey::Token).is_some());
//! # Ok(())
//! # }
//! ```

pub mod factory;

pub use vault_creds_provider;
pub use vault_creds_secret;
#[cfg(feature = "token")]
pub use vault_creds_token;
pub use vault_creds_types;

pub use factory::{init_credential_provider, new_credential_provider};

/// Happy-path imports for wiring credential providers.
pub mod prelude {
    pub use crate::factory::{init_credential_provider, new_credential_provider};

    pub use vault_creds_types::{
        CredentialKey, ProviderMethod, ProviderUid, VaultAuth, VaultAuthConfigToken,
    };

    pub use vault_creds_secret::{Credentials, SecretValue};

    pub use vault_creds_provider::{
        ClusterClient, CredentialError, CredentialProvider, ProviderContext,
    };

    #[cfg(feature = "token")]
    pub use vault_creds_token::TokenCredentialProvider;
}
