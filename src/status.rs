//! Status signal: transient sign-in feedback shown as a toast.
//!
//! DESIGN
//! ======
//! One signal per page instance, held in a `watch` channel so renderers can
//! subscribe. A user action starts with `begin` (loading) and settles once with
//! `succeed` or `fail`; settling outside of loading is ignored, which keeps
//! transitions monotonic within an action.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub const SIGNING_IN: &str = "Signing in...";
pub const SIGNED_IN: &str = "Successfully signed in";
pub const SIGN_IN_FAILED: &str = "Error signing in";

/// Current feedback state. Serializes as `{"type": "error", "title": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StatusSignal {
    #[default]
    None,
    Loading {
        title: String,
    },
    Success {
        title: String,
    },
    Error {
        title: String,
    },
}

impl StatusSignal {
    #[must_use]
    pub fn loading(title: &str) -> Self {
        Self::Loading { title: title.to_owned() }
    }

    #[must_use]
    pub fn success(title: &str) -> Self {
        Self::Success { title: title.to_owned() }
    }

    #[must_use]
    pub fn error(title: &str) -> Self {
        Self::Error { title: title.to_owned() }
    }

    /// Lowercase tag, used as a CSS modifier.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Loading { title } | Self::Success { title } | Self::Error { title } => Some(title),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Holder for the active [`StatusSignal`].
#[derive(Debug)]
pub struct StatusTracker {
    tx: watch::Sender<StatusSignal>,
}

impl StatusTracker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StatusSignal::None);
        Self { tx }
    }

    /// Start a new action. Always allowed; replaces whatever was shown.
    pub fn begin(&self, title: &str) {
        self.tx.send_replace(StatusSignal::loading(title));
    }

    /// Start an action unless an earlier one on this page already settled.
    /// Returns `false` when a success or error is showing.
    pub fn begin_unless_settled(&self, title: &str) -> bool {
        self.tx.send_if_modified(|current| match current {
            StatusSignal::Success { .. } | StatusSignal::Error { .. } => false,
            StatusSignal::None | StatusSignal::Loading { .. } => {
                *current = StatusSignal::loading(title);
                true
            }
        })
    }

    /// Settle the running action as successful. Returns `false` if no action
    /// was loading.
    pub fn succeed(&self, title: &str) -> bool {
        self.settle(StatusSignal::success(title))
    }

    /// Settle the running action as failed. Returns `false` if no action was
    /// loading.
    pub fn fail(&self, title: &str) -> bool {
        self.settle(StatusSignal::error(title))
    }

    /// Clear the signal, as closing the toast does.
    pub fn dismiss(&self) {
        self.tx.send_replace(StatusSignal::None);
    }

    #[must_use]
    pub fn current(&self) -> StatusSignal {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StatusSignal> {
        self.tx.subscribe()
    }

    fn settle(&self, next: StatusSignal) -> bool {
        let kind = next.kind();
        let applied = self.tx.send_if_modified(|current| {
            if !current.is_loading() {
                return false;
            }
            *current = next;
            true
        });
        if !applied {
            tracing::warn!(kind, "status settle ignored: no action in progress");
        }
        applied
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
