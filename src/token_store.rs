//! Durable bearer-token storage.
//!
//! One opaque token string, persisted to a file under the app data
//! directory so a session survives process restarts. Absence of the
//! file means logged out. No validation happens here — the store is a
//! plain scoped key-value resource written by the session store (and
//! by the API client's unauthorized policy) and read by the API client.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Errors from token persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Could not write token file: {0}")]
    Write(io::Error),
    #[error("Could not read token file: {0}")]
    Read(io::Error),
    #[error("Could not remove token file: {0}")]
    Remove(io::Error),
}

/// File-backed bearer token store.
///
/// All file I/O is short and guarded by a `Mutex` so concurrent tasks
/// on the runtime never interleave a write with a clear. The lock is
/// never held across an await point.
pub struct TokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TokenStore {
    /// Create a store persisting to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, overwriting any existing value.
    pub fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(TokenStoreError::Write)?;
        }
        fs::write(&self.path, token).map_err(TokenStoreError::Write)
    }

    /// Read the persisted token. `Ok(None)` when no token is stored.
    pub fn get(&self) -> Result<Option<String>, TokenStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError::Read(e)),
        }
    }

    /// Remove the persisted token. Removing an absent token is a no-op.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Remove(e)),
        }
    }
}
