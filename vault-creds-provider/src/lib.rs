#![deny(missing_docs)]
//! The credential provider contract.
//!
//! A [`CredentialProvider`] produces the material needed to log in to Vault
//! for one auth method. The controller builds one per bound `VaultAuth`,
//! calls [`CredentialProvider::init`] once, then calls
//! [`CredentialProvider::get_creds`] on every credential-refresh cycle.
//!
//! ## Separation of Concerns
//!
//! Providers produce credentials. They do not talk to Vault, cache results,
//! renew leases, or retry: the caller owns login, caching and backoff.
//! Network-backed variants reach the cluster through [`ClusterClient`];
//! file-backed variants ignore it.

pub mod context;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use context::ProviderContext;
pub use error::CredentialError;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use vault_creds_secret::Credentials;
use vault_creds_types::{ProviderMethod, ProviderUid, VaultAuth};

/// Read access to the cluster API, as needed by network-backed providers.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Fetch the data map of the Secret `name` in `namespace`.
    async fn get_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BTreeMap<String, Vec<u8>>, CredentialError>;
}

/// Produce credentials for one Vault auth method.
///
/// Instances are driven by one caller at a time. Nothing is written after
/// `init` returns, so distinct instances may run `get_creds` concurrently.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// The auth method this provider implements.
    fn method(&self) -> ProviderMethod;

    /// Bind the provider to `auth` and `provider_namespace`.
    ///
    /// Performs whatever fail-fast checks make later `get_creds` calls likely
    /// to succeed. Meant to be called once per instance.
    async fn init(
        &mut self,
        ctx: &ProviderContext,
        client: &dyn ClusterClient,
        auth: Arc<VaultAuth>,
        provider_namespace: &str,
    ) -> Result<(), CredentialError>;

    /// Produce a complete credential set, or an error. Never a partial set.
    async fn get_creds(
        &self,
        ctx: &ProviderContext,
        client: &dyn ClusterClient,
    ) -> Result<Credentials, CredentialError>;

    /// The namespace the credentials apply to.
    fn namespace(&self) -> &str;

    /// The identifier reported to the caller.
    fn uid(&self) -> &ProviderUid;
}
