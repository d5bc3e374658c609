//! Navigation capability injected into the login flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser page either reloads to a URL or changes route client-side. The
//! web surface records navigations and answers with a redirect; the CLI prints
//! them.

use std::sync::{Mutex, PoisonError};

/// Fixed application paths.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const CONNECT_WALLET: &str = "/connect-wallet";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Full page load of a path or absolute URL.
    Reload(String),
    /// Client-side route change to an application path.
    Push(String),
}

impl Navigation {
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Reload(target) | Self::Push(target) => target,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn reload(&self, url: &str);
    fn push_route(&self, path: &str);
}

// =============================================================================
// RECORDING NAVIGATOR
// =============================================================================

/// Keeps every navigation in issue order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    log: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Navigation> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent navigation; a browser ends up wherever the last one pointed.
    #[must_use]
    pub fn last(&self) -> Option<Navigation> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, navigation: Navigation) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn reload(&self, url: &str) {
        self.record(Navigation::Reload(url.to_owned()));
    }

    fn push_route(&self, path: &str) {
        self.record(Navigation::Push(path.to_owned()));
    }
}

// =============================================================================
// TERMINAL NAVIGATOR
// =============================================================================

/// Prints where a browser would go. Paths are resolved against `app_url`.
#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    app_url: String,
}

impl TerminalNavigator {
    #[must_use]
    pub fn new(app_url: &str) -> Self {
        Self { app_url: app_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn resolve(&self, target: &str) -> String {
        if target.starts_with('/') {
            format!("{}{target}", self.app_url)
        } else {
            target.to_owned()
        }
    }
}

impl Navigator for TerminalNavigator {
    fn reload(&self, url: &str) {
        println!("open {}", self.resolve(url));
    }

    fn push_route(&self, path: &str) {
        println!("-> {}", self.resolve(path));
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;
