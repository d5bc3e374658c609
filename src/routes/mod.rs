//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the login routes and the pages the login flow navigates to under a
//! single Axum router with request tracing.

pub mod login;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use tower_http::trace::TraceLayer;

use crate::navigation::paths;
use crate::pages::home::{self, HomePage};
use crate::pages::placeholder::PlaceholderPage;
use crate::pages::{Head, render_document};
use crate::sessions::BrowserSession;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(paths::HOME, get(home_page))
        .route(paths::LOGIN, get(login::login_page).post(login::submit_login))
        .route("/login/oauth/{provider}", post(login::start_oauth))
        .route("/login/wallet", post(login::connect_wallet))
        .route("/login/forgot-password", post(login::forgot_password))
        .route(paths::REGISTER, get(register_page))
        .route(paths::FORGOT_PASSWORD, get(forgot_password_page))
        .route(paths::CONNECT_WALLET, get(connect_wallet_page))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /`: show this browser's signed-in player, if any.
async fn home_page(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let session = BrowserSession::resolve(&jar, &state.sessions);
    let user = match state.provider_for(&session).get_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "home page rendered without session");
            None
        }
    };
    Html(render_document(Head::titled(home::TITLE), move || view! { <HomePage user=user/> }))
}

fn placeholder(title: &'static str, message: &'static str) -> Html<String> {
    Html(render_document(Head::titled(title), move || view! { <PlaceholderPage title=title message=message/> }))
}

async fn register_page() -> Html<String> {
    placeholder("Sign up", "Account registration is not part of this sample.")
}

async fn forgot_password_page() -> Html<String> {
    placeholder("Forgot password", "Password reset is not part of this sample.")
}

async fn connect_wallet_page() -> Html<String> {
    placeholder("Connect wallet", "Wallet connection is not part of this sample.")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
