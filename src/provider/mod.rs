//! Identity provider: the external authentication service contract.
//!
//! DESIGN
//! ======
//! The login flow never talks to the provider's API directly. It receives an
//! `Arc<dyn IdentityProvider>` at construction, so tests substitute a fake and
//! the binary plugs in [`openfort::OpenfortClient`].
//!
//! The web surface serves many browsers, each with its own credential storage.
//! It holds a [`ProviderFactory`] and binds a provider to the requesting
//! browser's store per request.

pub mod openfort;
pub mod types;

use std::sync::Arc;

use crate::credentials::CredentialStore;

pub use types::{
    AuthResponse, LinkedAccount, OAuthInit, OAuthProvider, ProviderError, SessionCredentials, UnknownOAuthProvider,
    UserSession,
};

/// The four provider operations the login flow depends on.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Persist credentials handed to the page, establishing a local session.
    async fn store_credentials(&self, credentials: SessionCredentials) -> Result<(), ProviderError>;

    /// Resolve the current player session, or reject when there is none.
    async fn get_user(&self) -> Result<UserSession, ProviderError>;

    /// Sign in with email and password.
    async fn log_in_with_email_password(&self, email: &str, password: &str) -> Result<UserSession, ProviderError>;

    /// Request an authorization URL for a federated provider. The provider
    /// sends the browser back to `redirect_to` with handoff parameters.
    async fn init_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthInit, ProviderError>;
}

/// Builds providers bound to one credential store.
pub trait ProviderFactory: Send + Sync {
    fn for_store(&self, store: Arc<dyn CredentialStore>) -> Arc<dyn IdentityProvider>;
}
