//! Fakes and mock servers shared by controller, provider and route tests.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::config::{ProviderConfig, ProviderTimeouts};
use crate::credentials::{CredentialStore, MemoryCredentialStore};
use crate::provider::openfort::{
    ME_PATH, OAUTH_INIT_PATH, OpenfortClient, PASSWORD_LOGIN_PATH, PLAYER_TOKEN_HEADER, REFRESH_PATH,
};
use crate::provider::{
    IdentityProvider, OAuthInit, OAuthProvider, ProviderError, ProviderFactory, SessionCredentials, UserSession,
};
use crate::status::{StatusSignal, StatusTracker};

pub fn player(id: &str) -> UserSession {
    UserSession { id: id.to_owned(), created_at: None, linked_accounts: Vec::new() }
}

/// Scripted provider. `None` results reject with `NotAuthenticated` /
/// `ApiResponse`; every call is recorded.
#[derive(Default)]
pub struct FakeProvider {
    pub session: Option<UserSession>,
    pub login_result: Option<UserSession>,
    pub oauth_url: Option<String>,
    pub fail_store: bool,
    pub observed: Option<Arc<StatusTracker>>,
    pub stored: Mutex<Vec<SessionCredentials>>,
    pub get_user_calls: Mutex<usize>,
    pub login_calls: Mutex<Vec<(String, String)>>,
    pub oauth_calls: Mutex<Vec<(OAuthProvider, String)>>,
    pub status_during_login: Mutex<Vec<StatusSignal>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, user: UserSession) -> Self {
        self.session = Some(user);
        self
    }

    pub fn with_login(mut self, user: UserSession) -> Self {
        self.login_result = Some(user);
        self
    }

    pub fn with_oauth_url(mut self, url: &str) -> Self {
        self.oauth_url = Some(url.to_owned());
        self
    }

    pub fn failing_store(mut self) -> Self {
        self.fail_store = true;
        self
    }

    pub fn observing(mut self, status: Arc<StatusTracker>) -> Self {
        self.observed = Some(status);
        self
    }

    pub fn stored(&self) -> Vec<SessionCredentials> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FakeProvider {
    async fn store_credentials(&self, credentials: SessionCredentials) -> Result<(), ProviderError> {
        if self.fail_store {
            let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            return Err(ProviderError::Storage(io.into()));
        }
        self.stored.lock().unwrap().push(credentials);
        Ok(())
    }

    async fn get_user(&self) -> Result<UserSession, ProviderError> {
        *self.get_user_calls.lock().unwrap() += 1;
        self.session.clone().ok_or(ProviderError::NotAuthenticated)
    }

    async fn log_in_with_email_password(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        self.login_calls
            .lock()
            .unwrap()
            .push((email.to_owned(), password.to_owned()));
        if let Some(status) = &self.observed {
            self.status_during_login.lock().unwrap().push(status.current());
        }
        self.login_result
            .clone()
            .ok_or(ProviderError::ApiResponse { status: 401, body: "invalid credentials".into() })
    }

    async fn init_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthInit, ProviderError> {
        self.oauth_calls
            .lock()
            .unwrap()
            .push((provider, redirect_to.to_owned()));
        self.oauth_url
            .clone()
            .map(|url| OAuthInit { url })
            .ok_or_else(|| ProviderError::ApiRequest("connection refused".into()))
    }
}

/// Hands every browser the same fake, ignoring its credential storage.
pub struct FixedProvider(pub Arc<FakeProvider>);

impl ProviderFactory for FixedProvider {
    fn for_store(&self, _store: Arc<dyn CredentialStore>) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.0) as Arc<dyn IdentityProvider>
    }
}

// =============================================================================
// MOCK IAM SERVER
// =============================================================================

// Accepts password "pw", access token "fresh" and refresh token "ref_1".

async fn mock_login(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer pk_test");
    if !authorized {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "bad key"})));
    }
    if body["password"] != "pw" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid credentials"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "player": {"id": "pla_1", "linkedAccounts": [{"provider": "email", "email": body["email"]}]},
            "token": "fresh",
            "refreshToken": "ref_1",
        })),
    )
}

async fn mock_me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get(PLAYER_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some("fresh") => (StatusCode::OK, Json(json!({"id": "pla_1", "object": "player"}))),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "expired"}))),
    }
}

async fn mock_refresh(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["refreshToken"] != "ref_1" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "revoked"})));
    }
    (
        StatusCode::OK,
        Json(json!({"player": {"id": "pla_1"}, "token": "fresh", "refreshToken": "ref_2"})),
    )
}

async fn mock_oauth(Json(body): Json<Value>) -> Json<Value> {
    let provider = body["provider"].as_str().unwrap_or_default();
    let redirect = body["options"]["redirectTo"].as_str().unwrap_or_default();
    Json(json!({"url": format!("https://accounts.example/{provider}?redirect_uri={redirect}")}))
}

/// Serve the mock IAM endpoints on an ephemeral port; returns its base URL.
pub async fn spawn_mock_iam() -> String {
    let app = Router::new()
        .route(PASSWORD_LOGIN_PATH, post(mock_login))
        .route(ME_PATH, get(mock_me))
        .route(REFRESH_PATH, post(mock_refresh))
        .route(OAUTH_INIT_PATH, post(mock_oauth));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client pointed at a mock IAM server, with throwaway storage until bound.
pub fn mock_openfort(base_url: &str) -> OpenfortClient {
    let config = ProviderConfig {
        publishable_key: "pk_test".into(),
        base_url: base_url.to_owned(),
        timeouts: ProviderTimeouts { request_secs: 5, connect_secs: 5 },
    };
    OpenfortClient::new(&config, Arc::new(MemoryCredentialStore::new())).unwrap()
}

// =============================================================================
// ROUTER HELPERS
// =============================================================================

pub struct TestResponse {
    pub status: axum::http::StatusCode,
    pub location: Option<String>,
    /// `name=value` of the first `Set-Cookie` header.
    pub cookie: Option<String>,
    pub body: String,
}

/// Drive one request through the router.
pub async fn send(app: axum::Router, request: axum::http::Request<axum::body::Body>) -> TestResponse {
    use tower::ServiceExt;

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse { status, location, cookie, body: String::from_utf8(bytes.to_vec()).unwrap() }
}

pub fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

pub fn post_request(uri: &str, body: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body.to_owned()))
        .unwrap()
}

/// Replay a cookie on a built request.
pub fn with_cookie(
    mut request: axum::http::Request<axum::body::Body>,
    cookie: &str,
) -> axum::http::Request<axum::body::Body> {
    request
        .headers_mut()
        .insert(axum::http::header::COOKIE, cookie.parse().unwrap());
    request
}
