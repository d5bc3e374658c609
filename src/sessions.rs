//! Browser sessions for the web surface.
//!
//! DESIGN
//! ======
//! Each browser carries an opaque random id in an HttpOnly cookie. The
//! credentials the login flow stores are kept server-side under that id, so
//! every browser gets its own local storage and one visitor's sign-in (or a
//! crafted handoff link) never reaches another browser.
//!
//! Entries exist only once credentials have been saved. Requests with a
//! missing or unknown cookie read as signed out and are handed a fresh id,
//! which is sent back only when something was stored under it.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;

use crate::credentials::{CredentialStore, StoreError};
use crate::provider::SessionCredentials;

pub const COOKIE_NAME: &str = "auth_sample_session";

/// Generate a cryptographically random 32-byte hex session id.
#[must_use]
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Credentials per browser session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    entries: Mutex<HashMap<String, SessionCredentials>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credential store scoped to one session id.
    #[must_use]
    pub fn store(self: &Arc<Self>, session_id: &str) -> SessionStore {
        SessionStore { registry: Arc::clone(self), session_id: session_id.to_owned() }
    }

    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().contains_key(session_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionCredentials>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`CredentialStore`] view of one registry entry.
#[derive(Debug, Clone)]
pub struct SessionStore {
    registry: Arc<SessionRegistry>,
    session_id: String,
}

#[async_trait::async_trait]
impl CredentialStore for SessionStore {
    async fn load(&self) -> Result<Option<SessionCredentials>, StoreError> {
        Ok(self.registry.lock().get(&self.session_id).cloned())
    }

    async fn save(&self, credentials: &SessionCredentials) -> Result<(), StoreError> {
        self.registry
            .lock()
            .insert(self.session_id.clone(), credentials.clone());
        tracing::debug!(player = %credentials.player, "session credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.registry.lock().remove(&self.session_id);
        Ok(())
    }
}

// =============================================================================
// BROWSER SESSION
// =============================================================================

/// The session id a request runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    id: String,
    issued: bool,
}

impl BrowserSession {
    /// Reuse the cookie's id when the registry knows it, otherwise mint one.
    #[must_use]
    pub fn resolve(jar: &CookieJar, registry: &SessionRegistry) -> Self {
        match jar.get(COOKIE_NAME).map(Cookie::value) {
            Some(id) if registry.contains(id) => Self { id: id.to_owned(), issued: false },
            _ => Self { id: generate_session_id(), issued: true },
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attach the session cookie if this request minted an id that now holds
    /// credentials.
    #[must_use]
    pub fn finish(self, jar: CookieJar, registry: &SessionRegistry, secure: bool) -> CookieJar {
        if !self.issued || !registry.contains(&self.id) {
            return jar;
        }
        let cookie = Cookie::build((COOKIE_NAME, self.id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure);
        jar.add(cookie)
    }
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
