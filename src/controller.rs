//! Login controller: session bootstrap and credential handoff for one page.
//!
//! DESIGN
//! ======
//! One controller per page instance. On load, `bootstrap` runs two
//! independent tasks: the credential handoff (only when the query carries all
//! three tokens) and the existing-session lookup. Their relative order is
//! unspecified; when both redirect, both navigations are issued and the later
//! one wins. A found session does not reopen the loading state once the
//! handoff has already settled it.
//!
//! User actions (`submit`, `start_oauth`, the secondary links) are
//! single-flight per call. Nothing here retries, times out, or guards against
//! a double submit.
//!
//! ERROR HANDLING
//! ==============
//! - session lookup failure: logged, treated as "no session"
//! - password login failure: generic error status, no detail
//! - OAuth initiation failure: returned to the caller untouched

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::handoff::HandoffParams;
use crate::navigation::{Navigator, paths};
use crate::provider::{IdentityProvider, OAuthInit, OAuthProvider, ProviderError, UserSession};
use crate::status::{SIGN_IN_FAILED, SIGNED_IN, SIGNING_IN, StatusTracker};

/// Email + password form fields.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the page-load tasks found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bootstrap {
    /// Handoff credentials were persisted and a reload to `/` issued.
    pub handed_off: bool,
    /// An existing session resolved and a route change to `/` issued.
    pub session: Option<UserSession>,
}

pub struct LoginController {
    provider: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    status: Arc<StatusTracker>,
    app_url: String,
}

impl LoginController {
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        status: Arc<StatusTracker>,
        app_url: &str,
    ) -> Self {
        Self { provider, navigator, status, app_url: app_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    /// Where OAuth providers send the browser back to.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}{}", self.app_url, paths::LOGIN)
    }

    /// Page-load tasks: credential handoff and existing-session lookup.
    pub async fn bootstrap(&self, params: &HandoffParams) -> Bootstrap {
        let (handed_off, session) = tokio::join!(self.consume_handoff(params), self.resume_session());
        Bootstrap { handed_off, session }
    }

    async fn consume_handoff(&self, params: &HandoffParams) -> bool {
        let Some(credentials) = params.credentials() else {
            return false;
        };
        self.status.begin(SIGNING_IN);
        info!(player = %credentials.player, "credential handoff received");

        // TODO: verify handed-off tokens with the provider before persisting
        // once it exposes a token introspection endpoint.
        match self.provider.store_credentials(credentials).await {
            Ok(()) => {
                self.navigator.reload(paths::HOME);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to persist handed-off credentials");
                self.status.fail(SIGN_IN_FAILED);
                false
            }
        }
    }

    async fn resume_session(&self) -> Option<UserSession> {
        match self.provider.get_user().await {
            Ok(user) => {
                debug!(player = %user.id, "existing session found");
                self.status.begin_unless_settled(SIGNING_IN);
                self.navigator.push_route(paths::HOME);
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "no existing session");
                None
            }
        }
    }

    /// Password login.
    ///
    /// # Errors
    ///
    /// Returns the provider rejection after the status signal shows the
    /// generic sign-in error.
    pub async fn submit(&self, form: &LoginForm) -> Result<UserSession, ProviderError> {
        self.status.begin(SIGNING_IN);
        match self
            .provider
            .log_in_with_email_password(&form.email, &form.password)
            .await
        {
            Ok(user) => {
                info!(player = %user.id, "signed in with password");
                self.status.succeed(SIGNED_IN);
                self.navigator.push_route(paths::HOME);
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "password login rejected");
                self.status.fail(SIGN_IN_FAILED);
                Err(e)
            }
        }
    }

    /// Federated login: fetch the provider's authorization URL and reload to it.
    ///
    /// # Errors
    ///
    /// Returns the provider rejection unchanged; the status signal is not
    /// touched.
    pub async fn start_oauth(&self, provider: OAuthProvider) -> Result<(), ProviderError> {
        let redirect_to = self.login_url();
        let OAuthInit { url } = self.provider.init_oauth(provider, &redirect_to).await?;
        info!(%provider, "redirecting to OAuth provider");
        self.navigator.reload(&url);
        Ok(())
    }

    pub fn connect_wallet(&self) {
        self.navigator.push_route(paths::CONNECT_WALLET);
    }

    pub fn forgot_password(&self) {
        self.navigator.push_route(paths::FORGOT_PASSWORD);
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
