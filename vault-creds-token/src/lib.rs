#![deny(missing_docs)]
//! Token auth: a credential provider that reads a pre-issued Vault token
//! from a file.
//!
//! The file is re-read on every [`CredentialProvider::get_creds`] call, so an
//! external agent can rotate its contents without the provider being rebuilt.
//! Leading and trailing whitespace is trimmed; a file with nothing left after
//! trimming is an error.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};
use vault_creds_provider::{ClusterClient, CredentialError, CredentialProvider, ProviderContext};
use vault_creds_secret::{Credentials, SecretValue};
use vault_creds_types::{
    CredentialKey, ProviderMethod, ProviderUid, VaultAuth, VaultAuthConfigToken,
};
use zeroize::Zeroizing;

/// Reads the Vault token from the file named by the bound `VaultAuth`'s
/// token settings.
///
/// Holds no secret material: only the configuration, namespace and UID.
#[derive(Debug, Default)]
pub struct TokenCredentialProvider {
    auth: Option<Arc<VaultAuth>>,
    provider_namespace: String,
    uid: ProviderUid,
}

impl TokenCredentialProvider {
    /// Create a provider with every field already bound, skipping `init`'s
    /// checks.
    pub fn new(
        auth: Arc<VaultAuth>,
        provider_namespace: impl Into<String>,
        uid: impl Into<ProviderUid>,
    ) -> Self {
        Self {
            auth: Some(auth),
            provider_namespace: provider_namespace.into(),
            uid: uid.into(),
        }
    }

    /// The bound configuration, if any.
    pub fn auth(&self) -> Option<&Arc<VaultAuth>> {
        self.auth.as_ref()
    }

    fn token_config(&self) -> Result<&VaultAuthConfigToken, CredentialError> {
        self.auth
            .as_ref()
            .ok_or(CredentialError::NotInitialized)?
            .spec
            .token
            .as_ref()
            .ok_or(CredentialError::ConfigurationMissing(ProviderMethod::Token))
    }

    async fn read_bound_token(&self) -> Result<SecretValue, CredentialError> {
        read_token_file(self.token_config()?).await
    }
}

/// Read and trim the token named by `config`.
///
/// Leading and trailing whitespace is removed and every other byte is kept
/// as-is. Valid UTF-8 is trimmed of Unicode whitespace; anything else of ASCII
/// whitespace only. The raw buffer is zeroed before returning.
pub async fn read_token_file(
    config: &VaultAuthConfigToken,
) -> Result<SecretValue, CredentialError> {
    let path = Path::new(&config.file_path);
    if config.file_path.is_empty() {
        return Err(CredentialError::EmptyFilePath);
    }

    let data = Zeroizing::new(tokio::fs::read(path).await.map_err(|source| {
        CredentialError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?);

    let token = trim_token(&data);
    if token.is_empty() {
        return Err(CredentialError::EmptyOrWhitespaceToken {
            path: path.to_path_buf(),
        });
    }

    Ok(SecretValue::new(token.to_vec()))
}

fn trim_token(data: &[u8]) -> &[u8] {
    match std::str::from_utf8(data) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => data.trim_ascii(),
    }
}

#[async_trait]
impl CredentialProvider for TokenCredentialProvider {
    fn method(&self) -> ProviderMethod {
        ProviderMethod::Token
    }

    async fn init(
        &mut self,
        _ctx: &ProviderContext,
        _client: &dyn ClusterClient,
        auth: Arc<VaultAuth>,
        provider_namespace: &str,
    ) -> Result<(), CredentialError> {
        let config = auth
            .spec
            .token
            .as_ref()
            .ok_or(CredentialError::ConfigurationMissing(ProviderMethod::Token))?;
        config
            .validate()
            .map_err(|source| CredentialError::ConfigurationInvalid {
                method: ProviderMethod::Token,
                source,
            })?;

        // Fail fast on an unreadable or empty file. The token itself is dropped.
        read_token_file(config).await?;

        debug!(
            namespace = provider_namespace,
            path = %config.file_path,
            "token credential provider bound"
        );

        self.auth = Some(auth);
        self.provider_namespace = provider_namespace.to_owned();
        // Not backed by an addressable resource, so the UID is a fixed literal.
        self.uid = ProviderUid::token_file();
        Ok(())
    }

    async fn get_creds(
        &self,
        ctx: &ProviderContext,
        _client: &dyn ClusterClient,
    ) -> Result<Credentials, CredentialError> {
        let token = match self.read_bound_token().await {
            Ok(token) => token,
            Err(err) => {
                error!(
                    error = %err,
                    namespace = %self.provider_namespace,
                    actor = ctx.actor().unwrap_or_default(),
                    "failed to read token from file"
                );
                return Err(err);
            }
        };

        debug!(namespace = %self.provider_namespace, "read token from file");
        Ok(Credentials::single(CredentialKey::Token, token))
    }

    fn namespace(&self) -> &str {
        &self.provider_namespace
    }

    fn uid(&self) -> &ProviderUid {
        &self.uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;
    use vault_creds_provider::test_utils::InMemoryClusterClient;

    const NAMESPACE: &str = "test-provider-namespace";

    fn _assert_send_sync<T: Send + Sync>() {}

    fn write_token(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn token_auth(path: &Path) -> Arc<VaultAuth> {
        Arc::new(VaultAuth::token(path.to_string_lossy()))
    }

    fn expose(creds: &Credentials) -> String {
        creds
            .get_key(CredentialKey::Token)
            .unwrap()
            .with_bytes(|b| String::from_utf8(b.to_vec()).unwrap())
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn object_safety() {
        _assert_send_sync::<Box<dyn CredentialProvider>>();
        _assert_send_sync::<Arc<dyn CredentialProvider>>();
        let _: Box<dyn CredentialProvider> = Box::new(TokenCredentialProvider::default());
    }

    #[tokio::test]
    async fn init_binds_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_token(&dir, "valid-token", b"vault-token-value");
        let auth = token_auth(&path);
        let client = InMemoryClusterClient::new();

        let mut provider = TokenCredentialProvider::default();
        provider
            .init(&ProviderContext::new(), &client, auth.clone(), NAMESPACE)
            .await
            .unwrap();

        assert!(Arc::ptr_eq(provider.auth().unwrap(), &auth));
        assert_eq!(provider.namespace(), NAMESPACE);
        assert_eq!(provider.uid(), &ProviderUid::new("token-file-provider"));
        assert_eq!(provider.method(), ProviderMethod::Token);
        assert_eq!(client.lookups(), 0);
    }

    #[tokio::test]
    async fn init_rejects_bad_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_token(&dir, "empty-token", b"");
        let whitespace = write_token(&dir, "whitespace-token", b"   \n\t  ");

        let cases: Vec<(&str, VaultAuth, String)> = vec![
            (
                "missing token config",
                VaultAuth::new(ProviderMethod::Token),
                "token auth method not configured".into(),
            ),
            (
                "empty filePath",
                VaultAuth::token(""),
                "invalid token auth configuration: empty filePath".into(),
            ),
            (
                "file not found",
                VaultAuth::token("/non/existent/path"),
                "failed to read token file /non/existent/path".into(),
            ),
            (
                "empty token file",
                VaultAuth::token(empty.to_string_lossy()),
                format!(
                    "token file {} is empty or contains only whitespace",
                    empty.display()
                ),
            ),
            (
                "whitespace-only token file",
                VaultAuth::token(whitespace.to_string_lossy()),
                format!(
                    "token file {} is empty or contains only whitespace",
                    whitespace.display()
                ),
            ),
        ];

        for (name, auth, expected) in cases {
            let mut provider = TokenCredentialProvider::default();
            let err = provider
                .init(
                    &ProviderContext::new(),
                    &InMemoryClusterClient::new(),
                    Arc::new(auth),
                    NAMESPACE,
                )
                .await
                .unwrap_err();
            assert!(
                err.to_string().contains(&expected),
                "{name}: {err} does not contain {expected}"
            );
            assert!(provider.auth().is_none(), "{name}: left state bound");
            assert!(provider.uid().is_empty(), "{name}: assigned a uid");
        }
    }

    #[tokio::test]
    async fn init_error_kinds() {
        let mut provider = TokenCredentialProvider::default();
        let ctx = ProviderContext::new();
        let client = InMemoryClusterClient::new();

        let err = provider
            .init(&ctx, &client, Arc::new(VaultAuth::token("")), NAMESPACE)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialError::ConfigurationInvalid {
                method: ProviderMethod::Token,
                ..
            }
        ));

        let err = provider
            .init(&ctx, &client, Arc::new(VaultAuth::token("/non/existent/path")), NAMESPACE)
            .await
            .unwrap_err();
        match err {
            CredentialError::FileUnreadable { path, source } => {
                assert_eq!(path, PathBuf::from("/non/existent/path"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected FileUnreadable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_reinit_keeps_previous_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_token(&dir, "valid-token", b"first");
        let ctx = ProviderContext::new();
        let client = InMemoryClusterClient::new();

        let mut provider = TokenCredentialProvider::default();
        provider
            .init(&ctx, &client, token_auth(&path), NAMESPACE)
            .await
            .unwrap();
        provider
            .init(&ctx, &client, Arc::new(VaultAuth::token("/non/existent/path")), "other")
            .await
            .unwrap_err();

        assert_eq!(provider.namespace(), NAMESPACE);
        let creds = provider.get_creds(&ctx, &client).await.unwrap();
        assert_eq!(expose(&creds), "first");
    }

    #[tokio::test]
    async fn get_creds_returns_trimmed_token() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("valid-token", &b"vault-token-value"[..]),
            ("token-with-whitespace", &b"  vault-token-value\n  "[..]),
            ("crlf-token", &b"\tvault-token-value\r\n"[..]),
        ];

        for (name, contents) in cases {
            let path = write_token(&dir, name, contents);
            let provider = TokenCredentialProvider::new(token_auth(&path), NAMESPACE, "");
            let creds = provider
                .get_creds(&ProviderContext::new(), &InMemoryClusterClient::new())
                .await
                .unwrap();
            assert_eq!(creds.len(), 1, "{name}");
            assert_eq!(expose(&creds), "vault-token-value", "{name}");
        }
    }

    #[tokio::test]
    async fn get_creds_errors_return_no_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_token(&dir, "empty-token", b"");
        let cases = [
            (
                VaultAuth::token("/non/existent/path"),
                "failed to read token file /non/existent/path".to_owned(),
            ),
            (
                VaultAuth::token(empty.to_string_lossy()),
                format!(
                    "token file {} is empty or contains only whitespace",
                    empty.display()
                ),
            ),
            (
                VaultAuth::new(ProviderMethod::Token),
                "token auth method not configured".to_owned(),
            ),
        ];

        for (auth, expected) in cases {
            let provider = TokenCredentialProvider::new(Arc::new(auth), NAMESPACE, "");
            let result = provider
                .get_creds(&ProviderContext::new(), &InMemoryClusterClient::new())
                .await;
            let err = result.unwrap_err();
            assert!(err.to_string().contains(&expected), "{err}");
        }
    }

    #[tokio::test]
    async fn get_creds_before_init_fails() {
        let provider = TokenCredentialProvider::default();
        let err = provider
            .get_creds(&ProviderContext::new(), &InMemoryClusterClient::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::NotInitialized));
    }

    #[tokio::test]
    async fn get_creds_rereads_rotated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_token(&dir, "rotating-token", b"hvs.first");
        let ctx = ProviderContext::new();
        let client = InMemoryClusterClient::new();

        let mut provider = TokenCredentialProvider::default();
        provider
            .init(&ctx, &client, token_auth(&path), NAMESPACE)
            .await
            .unwrap();
        assert_eq!(expose(&provider.get_creds(&ctx, &client).await.unwrap()), "hvs.first");

        std::fs::write(&path, b"hvs.second\n").unwrap();
        assert_eq!(expose(&provider.get_creds(&ctx, &client).await.unwrap()), "hvs.second");

        std::fs::remove_file(&path).unwrap();
        let err = provider.get_creds(&ctx, &client).await.unwrap_err();
        assert!(matches!(err, CredentialError::FileUnreadable { .. }));
        assert!(err.is_retryable());

        // Accessors are unaffected by get_creds outcomes.
        assert_eq!(provider.namespace(), NAMESPACE);
        assert_eq!(provider.uid(), &ProviderUid::token_file());
    }

    #[tokio::test]
    async fn get_creds_ignores_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_token(&dir, "valid-token", b"vault-token-value");
        let ctx = ProviderContext::new();
        ctx.cancellation().cancel();

        let provider = TokenCredentialProvider::new(token_auth(&path), NAMESPACE, "");
        let creds = provider
            .get_creds(&ctx, &InMemoryClusterClient::new())
            .await
            .unwrap();
        assert_eq!(expose(&creds), "vault-token-value");
    }

    #[tokio::test]
    async fn get_creds_logs_failures() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let provider = TokenCredentialProvider::new(
            Arc::new(VaultAuth::token("/non/existent/path")),
            NAMESPACE,
            "",
        );
        provider
            .get_creds(&ProviderContext::new(), &InMemoryClusterClient::new())
            .await
            .unwrap_err();

        let output = logs.contents();
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("failed to read token from file"), "{output}");
        assert!(output.contains("failed to read token file /non/existent/path"), "{output}");
        assert!(output.contains(NAMESPACE), "{output}");
    }

    #[tokio::test]
    async fn get_creds_failure_log_names_the_actor() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let provider = TokenCredentialProvider::new(
            Arc::new(VaultAuth::token("/non/existent/path")),
            NAMESPACE,
            "",
        );
        let ctx = ProviderContext::new().with_actor("apps/static-auth");
        provider
            .get_creds(&ctx, &InMemoryClusterClient::new())
            .await
            .unwrap_err();

        let output = logs.contents();
        assert!(output.contains("actor=\"apps/static-auth\""), "{output}");
    }

    #[tokio::test]
    async fn logs_never_contain_the_token() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempfile::tempdir().unwrap();
        let path = write_token(&dir, "valid-token", b"hvs.do-not-log-me");
        let ctx = ProviderContext::new();
        let client = InMemoryClusterClient::new();
        let mut provider = TokenCredentialProvider::default();
        provider
            .init(&ctx, &client, token_auth(&path), NAMESPACE)
            .await
            .unwrap();
        let creds = provider.get_creds(&ctx, &client).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("token credential provider bound"), "{output}");
        assert!(!output.contains("do-not-log-me"), "{output}");
        assert!(!format!("{creds:?}").contains("do-not-log-me"));
    }

    #[tokio::test]
    async fn read_token_file_trims_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let cases: [(&str, &[u8], Result<&str, &str>); 4] = [
            ("valid", b"my-vault-token", Ok("my-vault-token")),
            ("whitespace-around", b"  my-vault-token\n  ", Ok("my-vault-token")),
            ("empty", b"", Err("is empty or contains only whitespace")),
            ("whitespace-only", b"   \n\t  ", Err("is empty or contains only whitespace")),
        ];

        for (name, contents, expected) in cases {
            let path = write_token(&dir, &format!("{name}-token"), contents);
            let result = read_token_file(&VaultAuthConfigToken::new(path.to_string_lossy())).await;
            match expected {
                Ok(token) => result
                    .unwrap()
                    .with_bytes(|b| assert_eq!(b, token.as_bytes(), "{name}")),
                Err(msg) => {
                    let err = result.unwrap_err();
                    assert!(matches!(err, CredentialError::EmptyOrWhitespaceToken { .. }));
                    assert!(err.to_string().contains(msg), "{name}: {err}");
                }
            }
        }
    }

    #[tokio::test]
    async fn read_token_file_rejects_empty_path() {
        let err = read_token_file(&VaultAuthConfigToken::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::EmptyFilePath));
        assert!(err.to_string().contains("file path is empty"));
    }

    #[tokio::test]
    async fn read_token_file_preserves_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cases: [(&str, &[u8], &[u8]); 3] = [
            ("latin1", b" tok\xe9n\n", b"tok\xe9n"),
            ("leading-invalid", b"\xffabc\n", b"\xffabc"),
            ("unicode-space", "\u{a0}hvs.abc\u{2003}\n".as_bytes(), b"hvs.abc"),
        ];
        for (name, contents, expected) in cases {
            let path = write_token(&dir, name, contents);
            let token = read_token_file(&VaultAuthConfigToken::new(path.to_string_lossy()))
                .await
                .unwrap();
            token.with_bytes(|b| assert_eq!(b, expected, "{name}"));
        }
    }

    #[test]
    fn new_prepopulates_every_field() {
        let auth = Arc::new(VaultAuth::new(ProviderMethod::Token));
        let provider = TokenCredentialProvider::new(auth.clone(), "test-namespace", "test-uid");
        assert!(Arc::ptr_eq(provider.auth().unwrap(), &auth));
        assert_eq!(provider.namespace(), "test-namespace");
        assert_eq!(provider.uid(), &ProviderUid::new("test-uid"));
    }

    #[test]
    fn default_is_unbound() {
        let provider = TokenCredentialProvider::default();
        assert!(provider.auth().is_none());
        assert_eq!(provider.namespace(), "");
        assert!(provider.uid().is_empty());
    }
}
