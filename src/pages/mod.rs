//! Server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components take plain values (status, player) and are rendered to a full
//! HTML document per request. There is no hydration; forms post back to the
//! login routes.

pub mod home;
pub mod login;
pub mod placeholder;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;background:#f3f4f6;margin:0}\
.login-page{display:flex;justify-content:center;padding:4rem 1rem}\
.login-card{background:#fff;border-radius:8px;padding:2rem;width:100%;max-width:24rem}\
.login-input{display:block;width:100%;margin:.25rem 0 .75rem;padding:.5rem}\
.login-button{display:block;width:100%;margin-top:.5rem;padding:.5rem;cursor:pointer}\
.login-link{background:none;border:none;color:#2563eb;cursor:pointer;padding:0}\
.password-toggle{float:right;font-size:.875rem}\
.login-divider{border-top:1px solid #d1d5db;margin:1.5rem 0}\
.toast{margin-top:1rem;padding:.75rem;border-radius:4px}\
.toast--loading{background:#eff6ff}.toast--success{background:#ecfdf5}.toast--error{background:#fef2f2}";

/// Document `<head>` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> Head<'a> {
    #[must_use]
    pub const fn titled(title: &'a str) -> Self {
        Self { title, description: None }
    }
}

/// Render `body` inside the HTML shell.
pub fn render_document<F, V>(head: Head<'_>, body: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    let title = head.title.to_owned();
    let description = head
        .description
        .map(|content| view! { <meta name="description" content={content.to_owned()} /> });
    let owner = Owner::new();
    owner.with(move || {
        view! {
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>{title}</title>
                    {description}
                    <style>{STYLES}</style>
                </head>
                <body>{body()}</body>
            </html>
        }
        .to_html()
    })
}
