//! Credential handoff: session tokens delivered in the login page's query.
//!
//! After an OAuth callback or email verification the provider sends the
//! browser to `/login?access_token=..&refresh_token=..&player_id=..`.

use axum::extract::Query;
use axum::http::Uri;

use crate::provider::SessionCredentials;

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
}

/// Raw handoff fields as they appear in the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandoffParams {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub player_id: Option<String>,
}

impl HandoffParams {
    /// Parse handoff fields out of a full URL or a path with a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or its query string is malformed.
    pub fn from_url(raw: &str) -> Result<Self, HandoffError> {
        let uri: Uri = raw
            .trim()
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| HandoffError::InvalidUrl(e.to_string()))?;
        Self::from_uri(&uri)
    }

    /// # Errors
    ///
    /// Returns an error if the query string cannot be decoded.
    pub fn from_uri(uri: &Uri) -> Result<Self, HandoffError> {
        Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| Self::from_pairs(pairs))
            .map_err(|e| HandoffError::InvalidQuery(e.body_text()))
    }

    /// Pick the handoff fields out of decoded query pairs. Unrelated keys are
    /// ignored; a repeated key keeps its first value.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "access_token" => &mut params.access_token,
                "refresh_token" => &mut params.refresh_token,
                "player_id" => &mut params.player_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Credentials when all three fields are present and non-empty.
    #[must_use]
    pub fn credentials(&self) -> Option<SessionCredentials> {
        Some(SessionCredentials {
            player: non_empty(self.player_id.as_deref())?,
            access_token: non_empty(self.access_token.as_deref())?,
            refresh_token: non_empty(self.refresh_token.as_deref())?,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

#[cfg(test)]
#[path = "handoff_test.rs"]
mod tests;
