//! # auth-sample
//!
//! Sample login flows (email + password, OAuth, wallet) against an
//! Openfort-style identity provider.
//!
//! The crate's own logic is the login page's session bootstrap: pick up
//! handed-off credentials from the query, resume an existing session, submit
//! credentials, and start federated logins, reporting progress through a
//! status signal. The provider and the browser's navigation are injected, so
//! the same [`controller::LoginController`] drives the server-rendered pages in
//! [`routes`] and the terminal commands in the binary. The web surface keeps
//! credentials per browser ([`sessions`]); the terminal keeps one credential
//! file.

pub mod config;
pub mod controller;
pub mod credentials;
pub mod handoff;
pub mod navigation;
pub mod pages;
pub mod provider;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod status;

#[cfg(test)]
mod test_support;
