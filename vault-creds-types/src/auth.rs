//! The auth configuration a credential provider is bound to.
//!
//! [`VaultAuth`] mirrors the shape of the `VaultAuth` resource the controller
//! reconciles: object metadata plus a spec carrying the method discriminator
//! and one sub-configuration per method. Only the token sub-configuration is
//! modeled here.
//!
//! Manifests are JSON, camelCase:
//! ```json
//! {
//!   "metadata": { "name": "static", "namespace": "apps" },
//!   "spec": { "method": "token", "token": { "filePath": "/var/run/vault/token" } }
//! }
//! ```

use crate::consts::ProviderMethod;
use crate::error::ValidationError;
use crate::id::ProviderUid;
use serde::{Deserialize, Serialize};

/// Addressable identity of an auth configuration resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default)]
    pub name: String,
    /// Namespace the resource lives in.
    #[serde(default)]
    pub namespace: String,
    /// Server-assigned UID, when the resource has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<ProviderUid>,
}

/// Token auth settings: where the pre-issued token is mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAuthConfigToken {
    /// Path to a file containing the token.
    pub file_path: String,
}

impl VaultAuthConfigToken {
    /// Token settings reading from `file_path`.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Reject structurally invalid settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file_path.is_empty() {
            return Err(ValidationError::EmptyFilePath);
        }
        Ok(())
    }
}

/// How to authenticate to Vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAuthSpec {
    /// Selects the provider variant.
    pub method: ProviderMethod,
    /// Vault auth mount path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,
    /// Name of the connection resource describing the Vault server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_connection_ref: Option<String>,
    /// Settings for [`ProviderMethod::Token`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<VaultAuthConfigToken>,
}

impl VaultAuthSpec {
    /// A spec selecting `method` with no sub-configuration.
    pub fn new(method: ProviderMethod) -> Self {
        Self {
            method,
            mount: None,
            vault_connection_ref: None,
            token: None,
        }
    }
}

/// An auth configuration resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultAuth {
    /// Identity of the resource.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Authentication settings.
    pub spec: VaultAuthSpec,
}

impl VaultAuth {
    /// An unnamed configuration selecting `method`.
    pub fn new(method: ProviderMethod) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: VaultAuthSpec::new(method),
        }
    }

    /// Token auth reading from `file_path`.
    pub fn token(file_path: impl Into<String>) -> Self {
        Self::new(ProviderMethod::Token).with_token(VaultAuthConfigToken::new(file_path))
    }

    /// Parse a JSON manifest. Does not validate.
    pub fn from_json_str(s: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a JSON manifest from bytes. Does not validate.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Set the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = name.into();
        self
    }

    /// Set the resource namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = namespace.into();
        self
    }

    /// Set the resource UID.
    pub fn with_uid(mut self, uid: impl Into<ProviderUid>) -> Self {
        self.metadata.uid = Some(uid.into());
        self
    }

    /// Set the Vault auth mount.
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.spec.mount = Some(mount.into());
        self
    }

    /// Set the token sub-configuration.
    pub fn with_token(mut self, token: VaultAuthConfigToken) -> Self {
        self.spec.token = Some(token);
        self
    }

    /// The selected method.
    pub fn method(&self) -> ProviderMethod {
        self.spec.method
    }
}
