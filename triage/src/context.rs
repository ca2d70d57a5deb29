//! Collaborator capabilities passed explicitly into a checker session.
//!
//! DESIGN
//! ======
//! A session never reaches for a global client. Whoever builds it hands over a
//! [`CheckerContext`] naming who the user is ([`Identity`]) and how a request
//! reaches the proxy ([`TriageTransport`]). Tests swap either for a mock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::TriageFailure;
use crate::wire::{TriageRequest, TriageResponse};

/// Default bound on how long a session may stay in `Awaiting`.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(90);

// =============================================================================
// IDENTITY
// =============================================================================

/// The signed-in user as far as the checker cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

/// Source of the current session user.
pub trait Identity: Send + Sync {
    fn current_user(&self) -> Option<User>;

    /// Receiver that observes every sign-in/sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;

    fn sign_out(&self);
}

/// In-process identity backed by a watch channel.
pub struct LocalIdentity {
    tx: watch::Sender<Option<User>>,
}

impl LocalIdentity {
    #[must_use]
    pub fn new(user: Option<User>) -> Self {
        let (tx, _rx) = watch::channel(user);
        Self { tx }
    }

    /// Identity for a known user id with no further profile data.
    #[must_use]
    pub fn signed_in(id: impl Into<String>) -> Self {
        Self::new(Some(User { id: id.into(), email: None }))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn sign_in(&self, user: User) {
        self.tx.send_replace(Some(user));
    }
}

impl Identity for LocalIdentity {
    fn current_user(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.tx.subscribe()
    }

    fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// One classify round trip to the triage proxy.
#[async_trait::async_trait]
pub trait TriageTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TriageFailure`] whose kind tells the caller which notice to
    /// show; implementations must never retry on their own.
    async fn classify(&self, request: &TriageRequest) -> Result<TriageResponse, TriageFailure>;
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Everything a [`crate::SymptomChecker`] needs from the outside world.
#[derive(Clone)]
pub struct CheckerContext {
    pub identity: Arc<dyn Identity>,
    pub transport: Arc<dyn TriageTransport>,
    pub timeout: Duration,
}

impl CheckerContext {
    #[must_use]
    pub fn new(identity: Arc<dyn Identity>, transport: Arc<dyn TriageTransport>) -> Self {
        Self { identity, transport, timeout: DEFAULT_SUBMIT_TIMEOUT }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_identity_sign_out_clears_user() {
        let identity = LocalIdentity::signed_in("user-1");
        assert_eq!(identity.current_user().map(|u| u.id), Some("user-1".to_string()));
        identity.sign_out();
        assert!(identity.current_user().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let identity = LocalIdentity::anonymous();
        let mut rx = identity.subscribe();
        identity.sign_in(User { id: "user-2".into(), email: Some("a@b.test".into()) });
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|u| u.id.as_str()), Some("user-2"));
    }
}
