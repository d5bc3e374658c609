//! Local credential storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider client persists whatever credentials the login flow hands it
//! and reads them back to resolve the current session. The file store is the
//! native stand-in for browser local storage.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::provider::SessionCredentials;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential file malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence for one player's session credentials.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<SessionCredentials>, StoreError>;
    async fn save(&self, credentials: &SessionCredentials) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON file holding the current credentials. Missing file means signed out.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<SessionCredentials>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, credentials: &SessionCredentials) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(credentials)?;
        tokio::fs::write(&self.path, body).await?;
        tracing::debug!(path = %self.path.display(), player = %credentials.player, "credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<SessionCredentials>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_credentials(credentials: SessionCredentials) -> Self {
        Self { inner: Mutex::new(Some(credentials)) }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<SessionCredentials>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, credentials: &SessionCredentials) -> Result<(), StoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
