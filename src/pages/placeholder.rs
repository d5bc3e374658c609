//! Pages the login flow links to but this sample does not implement.

use leptos::prelude::*;

use crate::navigation::paths;

#[component]
pub fn PlaceholderPage(title: &'static str, message: &'static str) -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{title}</h1>
                <p>{message}</p>
                <a href=paths::LOGIN class="login-link">"Back to sign in"</a>
            </div>
        </div>
    }
}
