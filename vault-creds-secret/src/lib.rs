#![deny(missing_docs)]
//! Containers for the credential material a provider returns.
//!
//! A Vault token read from disk travels as a [`SecretValue`] inside a
//! [`Credentials`] set keyed by [`CredentialKey`]. Neither type implements
//! `Clone`, `Display` or `Serialize`. Their `Debug` output shows key names
//! only. Providers build a fresh set per `get_creds` call and keep none.

use std::collections::BTreeMap;
use std::collections::btree_map;
use vault_creds_types::CredentialKey;
use zeroize::Zeroizing;

/// Raw credential bytes, such as a Vault token.
///
/// The buffer is wiped when the value drops. Callers reach the bytes through
/// [`SecretValue::with_bytes`] and should not copy them out for longer than
/// the request that needs them.
pub struct SecretValue {
    inner: Zeroizing<Vec<u8>>,
}

impl SecretValue {
    /// Take ownership of `bytes` as a credential.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Zeroizing::new(bytes),
        }
    }

    /// Run `f` against the credential bytes and return its result.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.inner)
    }

    /// Byte length of the credential.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the credential has no bytes. Providers never return one.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(token: String) -> Self {
        Self::new(token.into_bytes())
    }
}

impl From<&str> for SecretValue {
    fn from(token: &str) -> Self {
        Self::new(token.into())
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A credential set: string keys mapped to secret values.
///
/// Either complete or absent. Providers return `Err` instead of a partially
/// filled set.
#[derive(Default)]
pub struct Credentials {
    entries: BTreeMap<String, SecretValue>,
}

impl Credentials {
    /// An empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A credential set holding exactly one entry.
    pub fn single(key: CredentialKey, value: SecretValue) -> Self {
        let mut creds = Self::new();
        creds.insert(key.as_str(), value);
        creds
    }

    /// Insert an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: SecretValue) -> Option<SecretValue> {
        self.entries.insert(key.into(), value)
    }

    /// Look up an entry by raw key.
    pub fn get(&self, key: &str) -> Option<&SecretValue> {
        self.entries.get(key)
    }

    /// Look up an entry by well-known key.
    pub fn get_key(&self, key: CredentialKey) -> Option<&SecretValue> {
        self.get(key.as_str())
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Credentials {
    type Item = (String, SecretValue);
    type IntoIter = btree_map::IntoIter<String, SecretValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.keys().map(|k| (k, "[REDACTED]")))
            .finish()
    }
}
