//! Login routes: page bootstrap and the form actions.
//!
//! Every request opens a fresh page instance bound to the browser's session
//! cookie. When the controller navigates, the handler answers `303 See Other`
//! to the last target; otherwise it renders the login page with the current
//! status toast. A session cookie is set whenever the page stored credentials
//! for a browser that had none.

use axum::Form;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;

use crate::controller::LoginForm;
use crate::handoff::HandoffParams;
use crate::navigation::Navigation;
use crate::pages::login::{HEAD, LoginPage};
use crate::pages::render_document;
use crate::provider::{OAuthProvider, ProviderError};
use crate::state::{AppState, PageInstance};
use crate::status::StatusSignal;

fn redirect_to(destination: &Navigation) -> Response {
    Redirect::to(destination.target()).into_response()
}

fn render_login(code: StatusCode, status: StatusSignal) -> Response {
    let html = render_document(HEAD, move || view! { <LoginPage status=status/> });
    (code, Html(html)).into_response()
}

fn settle(page: &PageInstance, fallback: StatusCode) -> Response {
    match page.destination() {
        Some(destination) => redirect_to(&destination),
        None => render_login(fallback, page.controller.status().current()),
    }
}

fn finish(state: &AppState, page: PageInstance, jar: CookieJar, fallback: StatusCode) -> Response {
    let response = settle(&page, fallback);
    (state.close_page(page, jar), response).into_response()
}

/// Handoff fields from the page query. An unreadable query means no handoff.
fn handoff_params(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> HandoffParams {
    match query {
        Ok(Query(pairs)) => HandoffParams::from_pairs(pairs),
        Err(e) => {
            tracing::debug!(error = %e.body_text(), "ignoring unreadable login query");
            HandoffParams::default()
        }
    }
}

pub(crate) fn oauth_failure_status(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ProviderError::ApiRequest(_) | ProviderError::ApiResponse { .. } | ProviderError::ApiParse(_) => {
            StatusCode::BAD_GATEWAY
        }
        ProviderError::HttpClientBuild(_) | ProviderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `GET /login`: run the page-load tasks, then redirect or render the form.
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = handoff_params(query);
    let page = state.open_page(&jar);
    page.controller.bootstrap(&params).await;
    finish(&state, page, jar, StatusCode::OK)
}

/// `POST /login`: email + password submission.
pub async fn submit_login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let page = state.open_page(&jar);
    // Rejections are already reflected in the status toast.
    let _ = page.controller.submit(&form).await;
    finish(&state, page, jar, StatusCode::UNAUTHORIZED)
}

/// `POST /login/oauth/{provider}`: redirect to the provider's authorization page.
pub async fn start_oauth(State(state): State<AppState>, jar: CookieJar, Path(provider): Path<String>) -> Response {
    let Ok(provider) = provider.parse::<OAuthProvider>() else {
        return (StatusCode::NOT_FOUND, "unknown OAuth provider").into_response();
    };

    let page = state.open_page(&jar);
    if let Err(e) = page.controller.start_oauth(provider).await {
        tracing::error!(error = %e, %provider, "oauth initiation failed");
        return (oauth_failure_status(&e), "OAuth initiation failed").into_response();
    }
    finish(&state, page, jar, StatusCode::OK)
}

/// `POST /login/wallet`: go to the wallet-connect page.
pub async fn connect_wallet(State(state): State<AppState>, jar: CookieJar) -> Response {
    let page = state.open_page(&jar);
    page.controller.connect_wallet();
    finish(&state, page, jar, StatusCode::OK)
}

/// `POST /login/forgot-password`: go to the password-reset page.
pub async fn forgot_password(State(state): State<AppState>, jar: CookieJar) -> Response {
    let page = state.open_page(&jar);
    page.controller.forgot_password();
    finish(&state, page, jar, StatusCode::OK)
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
