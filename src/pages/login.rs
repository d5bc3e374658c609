//! Login page supporting email + password, OAuth providers, and wallet.

use leptos::prelude::*;

use super::Head;
use crate::navigation::paths;
use crate::provider::OAuthProvider;
use crate::status::StatusSignal;

pub const TITLE: &str = "Sign in to account";

pub const HEAD: Head<'static> = Head {
    title: "Openfort Login | Sign in to the Openfort Dashboard",
    description: Some("Sign in to the Openfort Dashboard to manage your game accounts and more."),
};

const TOGGLE_PASSWORD: &str = "const p=document.getElementById('password');\
const show=p.type==='password';\
p.type=show?'text':'password';\
this.textContent=show?'Hide':'Show';\
this.setAttribute('aria-pressed',show)";

fn oauth_action(provider: OAuthProvider) -> String {
    format!("{}/oauth/{}", paths::LOGIN, provider.as_str())
}

#[component]
pub fn LoginPage(status: StatusSignal) -> impl IntoView {
    let oauth_buttons = OAuthProvider::ALL
        .into_iter()
        .map(|provider| {
            view! {
                <form method="post" action=oauth_action(provider)>
                    <button class="login-button" type="submit">
                        {format!("Continue with {}", provider.label())}
                    </button>
                </form>
            }
        })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{TITLE}</h1>
                <p class="login-card__subtitle">
                    "Don’t have an account? "
                    <a href=paths::REGISTER class="login-link">"Sign up"</a>
                </p>
                <form class="login-form" method="post" action=paths::LOGIN>
                    <label>
                        "Email address"
                        <input
                            class="login-input"
                            name="email"
                            type="email"
                            autocomplete="email"
                            required=true
                        />
                    </label>
                    <button
                        class="login-link password-toggle"
                        type="button"
                        aria-controls="password"
                        aria-pressed="false"
                        onclick=TOGGLE_PASSWORD
                    >
                        "Show"
                    </button>
                    <label>
                        "Password"
                        <input
                            class="login-input"
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            required=true
                        />
                    </label>
                    <button class="login-button" type="submit">"Sign in to account"</button>
                </form>
                <form method="post" action=format!("{}/forgot-password", paths::LOGIN)>
                    <button class="login-link" type="submit">"Forgot password?"</button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Or continue with"</p>
                {oauth_buttons}
                <form method="post" action=format!("{}/wallet", paths::LOGIN)>
                    <button class="login-button" type="submit">"Continue with wallet"</button>
                </form>
                <Toast status=status/>
            </div>
        </div>
    }
}

/// Status toast; renders nothing while the signal is `None`.
#[component]
pub fn Toast(status: StatusSignal) -> impl IntoView {
    let kind = status.kind();
    status.title().map(|title| {
        let title = title.to_owned();
        view! {
            <div class=format!("toast toast--{kind}") role="status">{title}</div>
        }
    })
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
