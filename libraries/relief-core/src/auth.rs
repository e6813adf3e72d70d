//! Session/auth gate
//!
//! Decides whether the player is reachable. The gate only records that a
//! login succeeded and for whom; token contents are never inspected.

use crate::error::{ReliefError, Result};
use crate::traits::AuthProvider;
use crate::types::{AuthenticationResponse, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Identity provider that always succeeds with a canned demo user
#[derive(Debug, Clone)]
pub struct DemoAuthProvider {
    user: User,
}

impl DemoAuthProvider {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

impl Default for DemoAuthProvider {
    fn default() -> Self {
        Self::new(User::new("demo@example.com").with_name("Demo User"))
    }
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    async fn login(&self) -> Result<AuthenticationResponse> {
        Ok(AuthenticationResponse::demo(self.user.clone()))
    }
}

#[derive(Debug, Clone)]
struct SignedIn {
    response: AuthenticationResponse,
    since: DateTime<Utc>,
}

/// Gate in front of the player screen
#[derive(Debug, Default)]
pub struct AuthGate {
    session: Option<SignedIn>,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a provider login and open the gate on success
    ///
    /// A failed login leaves the gate as it was so the user can retry.
    pub async fn login(&mut self, provider: &dyn AuthProvider) -> Result<&User> {
        let response = match provider.login().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Login failed");
                return Err(match e {
                    ReliefError::AuthFailed(_) | ReliefError::AuthCancelled => e,
                    other => ReliefError::auth_failed(other.to_string()),
                });
            }
        };

        info!(email = %response.user.email, demo = response.demo, "Login successful");
        let signed_in = self.session.insert(SignedIn {
            response,
            since: Utc::now(),
        });
        Ok(&signed_in.response.user)
    }

    /// Open the gate with the demo bypass
    pub async fn login_demo(&mut self) -> Result<&User> {
        self.login(&DemoAuthProvider::default()).await
    }

    /// Close the gate, returning who was signed in
    pub fn logout(&mut self) -> Option<User> {
        let user = self.session.take().map(|s| s.response.user);
        if let Some(user) = &user {
            info!(email = %user.email, "Logged out");
        }
        user
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.response.user)
    }

    /// Whether the current session came from the demo bypass
    pub fn is_demo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.response.demo)
    }

    /// When the current session was opened
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingProvider;

    #[async_trait]
    impl AuthProvider for RejectingProvider {
        async fn login(&self) -> Result<AuthenticationResponse> {
            Err(ReliefError::Other("network unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn demo_login_opens_the_gate() {
        let mut gate = AuthGate::new();
        assert!(!gate.is_authenticated());

        let user = gate.login_demo().await.unwrap().clone();
        assert_eq!(user.email, "demo@example.com");
        assert!(gate.is_authenticated());
        assert!(gate.is_demo());
        assert!(gate.signed_in_at().is_some());
    }

    #[tokio::test]
    async fn failed_login_keeps_gate_closed_and_is_retryable() {
        let mut gate = AuthGate::new();
        let err = gate.login(&RejectingProvider).await.unwrap_err();

        assert!(matches!(err, ReliefError::AuthFailed(_)));
        assert!(err.is_retryable());
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn logout_closes_the_gate() {
        let mut gate = AuthGate::new();
        gate.login_demo().await.unwrap();

        let user = gate.logout();
        assert_eq!(user.map(|u| u.email), Some("demo@example.com".to_string()));
        assert!(!gate.is_authenticated());
        assert!(gate.logout().is_none());
    }
}
