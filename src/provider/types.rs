//! Identity-provider types: credentials, player sessions, and errors.
//!
//! DESIGN
//! ======
//! Field names follow the provider's camelCase JSON so the same structs are
//! used for the wire and for local credential storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::credentials::StoreError;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity-provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No stored session exists, or the provider no longer accepts it.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Local credential storage failed.
    #[error("credential storage failed: {0}")]
    Storage(#[from] StoreError),
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Tokens issued by the provider for one player.
///
/// Opaque to this crate: they are persisted and replayed, never inspected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub player: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("player", &self.player)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// PLAYER SESSION
// =============================================================================

/// An authenticated player as returned by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Provider-assigned player identifier.
    pub id: String,
    /// Creation time in seconds since the Unix epoch, if reported.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Login methods attached to this player.
    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
}

impl UserSession {
    /// First email found across linked accounts.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.linked_accounts
            .iter()
            .find_map(|account| account.email.as_deref())
    }
}

/// A login method linked to a player (`email`, `google`, `wallet`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub provider: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body returned by password login and session refresh.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub player: UserSession,
    pub token: String,
    pub refresh_token: String,
}

impl AuthResponse {
    /// Split into the player and the credentials to persist.
    #[must_use]
    pub fn into_parts(self) -> (UserSession, SessionCredentials) {
        let credentials = SessionCredentials {
            player: self.player.id.clone(),
            access_token: self.token,
            refresh_token: self.refresh_token,
        };
        (self.player, credentials)
    }
}

// =============================================================================
// OAUTH
// =============================================================================

/// Federated login providers offered on the login page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Twitter,
    Facebook,
}

impl OAuthProvider {
    pub const ALL: [Self; 3] = [Self::Google, Self::Twitter, Self::Facebook];

    /// Wire name, also used in route paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
        }
    }

    /// Display name for buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown OAuth provider: {0}")]
pub struct UnknownOAuthProvider(pub String);

impl FromStr for OAuthProvider {
    type Err = UnknownOAuthProvider;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "twitter" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            _ => Err(UnknownOAuthProvider(raw.to_owned())),
        }
    }
}

/// Authorization URL handed back by OAuth initiation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct OAuthInit {
    pub url: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
