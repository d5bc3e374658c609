use super::*;
use crate::pages::render_document;

fn render(status: StatusSignal) -> String {
    render_document(HEAD, move || view! { <LoginPage status=status/> })
}

#[test]
fn oauth_action_targets_login_subroute() {
    assert_eq!(oauth_action(OAuthProvider::Twitter), "/login/oauth/twitter");
}

#[test]
fn login_page_offers_every_sign_in_path() {
    let html = render(StatusSignal::None);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Sign in to account"));
    assert!(html.contains("action=\"/login\""));
    assert!(html.contains("name=\"email\""));
    assert!(html.contains("name=\"password\""));
    for provider in OAuthProvider::ALL {
        assert!(html.contains(&format!("action=\"/login/oauth/{}\"", provider.as_str())));
        assert!(html.contains(&format!("Continue with {}", provider.label())));
    }
    assert!(html.contains("action=\"/login/wallet\""));
    assert!(html.contains("action=\"/login/forgot-password\""));
    assert!(html.contains("href=\"/register\""));
}

#[test]
fn no_toast_without_status() {
    let html = render(StatusSignal::None);
    assert!(!html.contains("role=\"status\""));
}

#[test]
fn error_status_renders_error_toast() {
    let html = render(StatusSignal::error("Error signing in"));
    assert!(html.contains("toast toast--error"));
    assert!(html.contains("Error signing in"));
}

#[test]
fn loading_status_renders_loading_toast() {
    let html = render(StatusSignal::loading("Signing in..."));
    assert!(html.contains("toast toast--loading"));
    assert!(html.contains("Signing in..."));
}

#[test]
fn document_head_names_the_dashboard() {
    let html = render(StatusSignal::None);
    assert!(html.contains("<title>Openfort Login | Sign in to the Openfort Dashboard</title>"));
    assert!(html.contains("name=\"description\""));
    assert!(html.contains("manage your game accounts"));
}

#[test]
fn password_field_has_visibility_toggle() {
    let html = render(StatusSignal::None);
    assert!(html.contains("id=\"password\""));
    assert!(html.contains("aria-controls=\"password\""));
    assert!(html.contains("type=\"button\""));
    assert!(html.contains("onclick="));
}
