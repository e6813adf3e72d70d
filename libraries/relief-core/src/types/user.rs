/// User domain types
use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account email
    pub email: String,

    /// Display name (the identity provider may not share one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    /// Create a user with only an email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Attach a display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name to greet the user with, falling back to the email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Result of a successful login
///
/// The token is carried but never inspected by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    /// Provider access token (absent for the demo bypass)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// The signed-in user
    pub user: User,

    /// Set when the demo bypass was used
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub demo: bool,
}

impl AuthenticationResponse {
    /// Response for a provider-backed login
    pub fn with_token(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: Some(access_token.into()),
            user,
            demo: false,
        }
    }

    /// Response for the demo bypass
    pub fn demo(user: User) -> Self {
        Self {
            access_token: None,
            user,
            demo: true,
        }
    }
}
