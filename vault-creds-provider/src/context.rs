//! Caller context threaded through every provider call.

use tokio_util::sync::CancellationToken;

/// Context for one provider call.
///
/// Network-backed providers stop outstanding requests once
/// [`ProviderContext::is_cancelled`] turns true. File reads are short and
/// are not interrupted.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    cancellation: CancellationToken,
    actor: Option<String>,
}

impl ProviderContext {
    /// A context that is never cancelled and has no actor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tie the context to the caller's cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Set the actor identity used for log correlation (e.g. the reconciled
    /// object's `namespace/name`).
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The cancellation token.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// True once the caller has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// The actor identity, if set.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}
