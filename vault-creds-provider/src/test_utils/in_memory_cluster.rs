//! InMemoryClusterClient — map-backed ClusterClient for testing.

use crate::{ClusterClient, CredentialError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cluster client serving Secrets from a `HashMap` behind a `RwLock`.
/// Counts lookups so tests can assert a provider never touched the cluster.
pub struct InMemoryClusterClient {
    secrets: RwLock<HashMap<(String, String), BTreeMap<String, Vec<u8>>>>,
    lookups: AtomicUsize,
}

impl InMemoryClusterClient {
    /// Create a client with no Secrets.
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Add or replace the Secret `name` in `namespace`.
    pub fn insert_secret(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        data: BTreeMap<String, Vec<u8>>,
    ) {
        if let Ok(mut secrets) = self.secrets.write() {
            secrets.insert((namespace.into(), name.into()), data);
        }
    }

    /// Number of `get_secret` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryClusterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterClient for InMemoryClusterClient {
    async fn get_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BTreeMap<String, Vec<u8>>, CredentialError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let secrets = self
            .secrets
            .read()
            .map_err(|e| CredentialError::Other(e.to_string().into()))?;
        secrets
            .get(&(namespace.to_owned(), name.to_owned()))
            .cloned()
            .ok_or_else(|| CredentialError::Backend(format!("secret {namespace}/{name} not found")))
    }
}
