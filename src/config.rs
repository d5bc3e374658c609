//! Application configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openfort.xyz";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CREDENTIALS_PATH: &str = ".auth-sample/credentials.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection settings for the identity provider API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub publishable_key: String,
    pub base_url: String,
    pub timeouts: ProviderTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    /// Public origin of this app; OAuth redirects come back to `<app_url>/login`.
    pub app_url: String,
    pub port: u16,
    pub credentials_path: PathBuf,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `OPENFORT_PUBLISHABLE_KEY`
    ///
    /// Optional:
    /// - `OPENFORT_BASE_URL`: default `https://api.openfort.xyz`
    /// - `OPENFORT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `OPENFORT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `APP_URL`: default `http://localhost:3000`
    /// - `PORT`: default 3000
    /// - `AUTH_CREDENTIALS_PATH`: default `.auth-sample/credentials.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the publishable key is missing or a numeric value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let publishable_key = lookup("OPENFORT_PUBLISHABLE_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar { var: "OPENFORT_PUBLISHABLE_KEY" })?;
        let base_url = trim_url(lookup("OPENFORT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()));
        let timeouts = ProviderTimeouts {
            request_secs: parse_or(&lookup, "OPENFORT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "OPENFORT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        let app_url = trim_url(lookup("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_owned()));
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let credentials_path = lookup("AUTH_CREDENTIALS_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH), PathBuf::from);

        Ok(Self {
            provider: ProviderConfig { publishable_key, base_url, timeouts },
            app_url,
            port,
            credentials_path,
        })
    }

    /// Apply command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(mut self, app_url: Option<String>, port: Option<u16>) -> Self {
        if let Some(app_url) = app_url {
            self.app_url = trim_url(app_url);
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

fn trim_url(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
