//! # vault-creds-types — vocabulary for Vault credential providers
//!
//! Data types only. The provider contract lives in `vault-creds-provider`
//! and the concrete variants in their own crates; this crate defines the
//! names every one of them agrees on.
//!
//! | Module | What it holds |
//! |--------|---------------|
//! | [`consts`] | Credential-map keys and auth method identifiers |
//! | [`id`] | [`ProviderUid`], the identifier a provider reports to its caller |
//! | [`auth`] | [`VaultAuth`], the configuration a provider is bound to |
//! | [`error`] | [`ValidationError`] for structurally invalid configuration |
//!
//! The strings in [`consts`] are a stable contract: the factory and the
//! login-request builder key off them, so they never change between versions.

#![deny(missing_docs)]

pub mod auth;
pub mod consts;
pub mod error;
pub mod id;

pub use auth::{ObjectMeta, VaultAuth, VaultAuthConfigToken, VaultAuthSpec};
pub use consts::{CredentialKey, ProviderMethod, UnknownVariant};
pub use error::ValidationError;
pub use id::ProviderUid;
