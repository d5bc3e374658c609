//! Landing page shown after sign-in.

use leptos::prelude::*;

use crate::navigation::paths;
use crate::provider::UserSession;

pub const TITLE: &str = "Home";

#[component]
pub fn HomePage(user: Option<UserSession>) -> impl IntoView {
    let body = match user {
        Some(user) => {
            let name = user.email().unwrap_or(&user.id).to_owned();
            let methods = user
                .linked_accounts
                .iter()
                .map(|account| account.provider.clone())
                .collect::<Vec<_>>()
                .join(", ");
            let methods = if methods.is_empty() { "none".to_owned() } else { methods };
            view! {
                <p class="home-greeting">"Signed in as " <strong>{name}</strong></p>
                <p class="home-player">"Player " <code>{user.id}</code></p>
                <p class="home-methods">{format!("Linked accounts: {methods}")}</p>
            }
            .into_any()
        }
        None => view! {
            <p>"You are not signed in."</p>
            <a href=paths::LOGIN class="login-button">"Sign in"</a>
        }
        .into_any(),
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Auth sample"</h1>
                {body}
            </div>
        </div>
    }
}

#[cfg(test)]
#[path = "home_test.rs"]
mod tests;
