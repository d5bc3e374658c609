//! Openfort IAM client.
//!
//! Thin HTTP wrapper over the player-auth endpoints. Credentials live in a
//! [`CredentialStore`]; the client reads them to resolve the current session
//! and rotates them once when the access token is rejected. Response parsing
//! is kept in pure functions for testability.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{IdentityProvider, ProviderFactory};
use super::types::{AuthResponse, OAuthInit, OAuthProvider, ProviderError, SessionCredentials, UserSession};
use crate::config::ProviderConfig;
use crate::credentials::CredentialStore;

pub(crate) const ME_PATH: &str = "/iam/v1/me";
pub(crate) const PASSWORD_LOGIN_PATH: &str = "/iam/v1/password/login";
pub(crate) const OAUTH_INIT_PATH: &str = "/iam/v1/oauth/init";
pub(crate) const REFRESH_PATH: &str = "/iam/v1/sessions";
pub(crate) const PLAYER_TOKEN_HEADER: &str = "x-player-token";

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenfortClient {
    http: reqwest::Client,
    base_url: String,
    publishable_key: String,
    store: Arc<dyn CredentialStore>,
}

impl OpenfortClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            publishable_key: config.publishable_key.clone(),
            store,
        })
    }

    /// Same HTTP client and key, different credential storage.
    #[must_use]
    pub fn with_store(&self, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            publishable_key: self.publishable_key.clone(),
            store,
        }
    }

    /// Forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store cannot be cleared.
    pub async fn log_out(&self) -> Result<(), ProviderError> {
        self.store.clear().await?;
        tracing::info!("signed out");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn fetch_me(&self, access_token: &str) -> Result<UserSession, ProviderError> {
        let response = self
            .http
            .get(self.endpoint(ME_PATH))
            .bearer_auth(&self.publishable_key)
            .header(PLAYER_TOKEN_HEADER, access_token)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;
        read_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionCredentials, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(REFRESH_PATH))
            .bearer_auth(&self.publishable_key)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;
        let auth: AuthResponse = read_json(response).await?;
        let (_, credentials) = auth.into_parts();
        Ok(credentials)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for OpenfortClient {
    async fn store_credentials(&self, credentials: SessionCredentials) -> Result<(), ProviderError> {
        self.store.save(&credentials).await?;
        Ok(())
    }

    async fn get_user(&self) -> Result<UserSession, ProviderError> {
        let Some(credentials) = self.store.load().await? else {
            return Err(ProviderError::NotAuthenticated);
        };

        match self.fetch_me(&credentials.access_token).await {
            Err(ProviderError::ApiResponse { status: 401, .. }) => {
                tracing::debug!(player = %credentials.player, "access token rejected; refreshing session");
                let refreshed = match self.refresh(&credentials.refresh_token).await {
                    Ok(refreshed) => refreshed,
                    Err(ProviderError::ApiResponse { status: 401 | 403, .. }) => {
                        return Err(ProviderError::NotAuthenticated);
                    }
                    Err(e) => return Err(e),
                };
                self.store.save(&refreshed).await?;
                self.fetch_me(&refreshed.access_token).await
            }
            other => other,
        }
    }

    async fn log_in_with_email_password(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(PASSWORD_LOGIN_PATH))
            .bearer_auth(&self.publishable_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;
        let auth: AuthResponse = read_json(response).await?;
        let (player, credentials) = auth.into_parts();
        self.store.save(&credentials).await?;
        Ok(player)
    }

    async fn init_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthInit, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(OAUTH_INIT_PATH))
            .bearer_auth(&self.publishable_key)
            .json(&oauth_init_body(provider, redirect_to))
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;
        read_json(response).await
    }
}

impl ProviderFactory for OpenfortClient {
    fn for_store(&self, store: Arc<dyn CredentialStore>) -> Arc<dyn IdentityProvider> {
        Arc::new(self.with_store(store))
    }
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

fn oauth_init_body(provider: OAuthProvider, redirect_to: &str) -> serde_json::Value {
    serde_json::json!({
        "provider": provider,
        "options": { "redirectTo": redirect_to },
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;
    parse_body(status, &text)
}

fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ProviderError> {
    if !(200..300).contains(&status) {
        return Err(ProviderError::ApiResponse { status, body: body.to_owned() });
    }
    serde_json::from_str(body).map_err(|e| ProviderError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "openfort_test.rs"]
mod tests;
