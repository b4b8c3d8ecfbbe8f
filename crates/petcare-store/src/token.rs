//! File-backed session token persistence.
//!
//! The browser build of this client kept the access token in localStorage;
//! here it lives in a small JSON file so a session survives process
//! restarts. A corrupt or unreadable file is treated as "no session" and
//! logged, never escalated to a hard failure.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;

/// On-disk shape: `{"access_token": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    access_token: String,
}

/// Handle to the persisted session token.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Create a handle for the given file path. Nothing is touched on disk
    /// until [`save`](Self::save) or [`clear`](Self::clear) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved token, if a readable one exists.
    pub fn load(&self) -> Option<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "session file unreadable, ignoring");
                return None;
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(session) => {
                debug!(path = %self.path.display(), "session token loaded");
                Some(session.access_token)
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "session file corrupt, ignoring");
                None
            }
        }
    }

    /// Persist a token, creating parent directories as needed.
    pub fn save(&self, token: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let session = PersistedSession {
            access_token: token.to_string(),
        };
        fs::write(&self.path, serde_json::to_string(&session)?)?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    /// Remove the persisted token. Absence is not an error.
    pub fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────
