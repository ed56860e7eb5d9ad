//! Map a configuration's auth method to a provider variant.

use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use vault_creds_provider::{ClusterClient, CredentialError, CredentialProvider, ProviderContext};
use vault_creds_types::{ProviderMethod, VaultAuth};

/// Build an unbound provider for `method`.
///
/// Fails with [`CredentialError::UnsupportedMethod`] for methods whose
/// variant is not compiled into this crate.
pub fn new_credential_provider(
    method: ProviderMethod,
) -> Result<Box<dyn CredentialProvider>, CredentialError> {
    match method {
        #[cfg(feature = "token")]
        ProviderMethod::Token => Ok(Box::new(
            vault_creds_token::TokenCredentialProvider::default(),
        )),
        other => Err(CredentialError::UnsupportedMethod(other)),
    }
}

/// Build the provider for `auth`'s method and bind it.
pub async fn init_credential_provider(
    ctx: &ProviderContext,
    client: &dyn ClusterClient,
    auth: Arc<VaultAuth>,
    provider_namespace: &str,
) -> Result<Box<dyn CredentialProvider>, CredentialError> {
    let method = auth.method();
    let span = info_span!(
        "credential_provider.init",
        method = %method,
        namespace = provider_namespace,
        actor = ctx.actor().unwrap_or_default(),
    );
    async move {
        let mut provider = new_credential_provider(method)?;
        provider.init(ctx, client, auth, provider_namespace).await?;
        info!(uid = %provider.uid(), "credential provider initialized");
        Ok(provider)
    }
    .instrument(span)
    .await
}
