//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the provider factory, the per-browser session registry and the public
//! app URL. Each request opens its own page instance, bound to the requesting
//! browser's credentials, with a fresh status signal and navigation log.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::controller::LoginController;
use crate::navigation::{Navigation, Navigator, RecordingNavigator};
use crate::provider::{IdentityProvider, ProviderFactory};
use crate::sessions::{BrowserSession, SessionRegistry};
use crate::status::StatusTracker;

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<dyn ProviderFactory>,
    pub sessions: Arc<SessionRegistry>,
    pub app_url: Arc<str>,
    /// Mark session cookies `Secure` when the app is served over https.
    pub secure_cookies: bool,
}

impl AppState {
    #[must_use]
    pub fn new(providers: Arc<dyn ProviderFactory>, app_url: &str) -> Self {
        let app_url = app_url.trim_end_matches('/');
        Self {
            providers,
            sessions: Arc::new(SessionRegistry::new()),
            app_url: Arc::from(app_url),
            secure_cookies: app_url.starts_with("https://"),
        }
    }

    /// Provider bound to one browser's credentials.
    #[must_use]
    pub fn provider_for(&self, session: &BrowserSession) -> Arc<dyn IdentityProvider> {
        self.providers
            .for_store(Arc::new(self.sessions.store(session.id())))
    }

    /// Open a page instance for one request.
    #[must_use]
    pub fn open_page(&self, jar: &CookieJar) -> PageInstance {
        let session = BrowserSession::resolve(jar, &self.sessions);
        let navigator = Arc::new(RecordingNavigator::new());
        let status = Arc::new(StatusTracker::new());
        let controller = LoginController::new(
            self.provider_for(&session),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&status),
            &self.app_url,
        );
        PageInstance { controller, navigator, session }
    }

    /// Hand the browser its session cookie if the page stored credentials
    /// under a new session.
    #[must_use]
    pub fn close_page(&self, page: PageInstance, jar: CookieJar) -> CookieJar {
        page.session.finish(jar, &self.sessions, self.secure_cookies)
    }
}

/// A login page as seen by one request.
pub struct PageInstance {
    pub controller: LoginController,
    navigator: Arc<RecordingNavigator>,
    session: BrowserSession,
}

impl PageInstance {
    /// Where the browser should end up, if the page navigated away.
    #[must_use]
    pub fn destination(&self) -> Option<Navigation> {
        self.navigator.last()
    }
}
