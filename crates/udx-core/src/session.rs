//! Operator session storage and retrieval.
//!
//! Stores the bearer token in `<base>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// A persisted operator session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token proving authentication
    pub token: String,
    /// RFC 3339 timestamp of when the token was stored.
    /// Informational only; expiry is the server's concern.
    pub saved_at: String,
}

/// File-backed session store.
///
/// The store is the single source of truth for whether an operator is
/// authenticated. It is bound to an explicit path so tests can point it at a
/// temp directory instead of the real UDX home.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by `${UDX_HOME}/session.json`.
    pub fn open_default() -> Self {
        Self::new(paths::session_path())
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session.
    /// Returns `None` if no session file exists.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Persists a session for `token` with restricted permissions (0600).
    /// Called exactly once per successful login.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn set(&self, token: &str) -> Result<()> {
        let session = Session {
            token: token.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted session.
    /// Returns whether a session existed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        Ok(true)
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    /// Test: set then load round-trips the token.
    #[test]
    fn test_set_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set("tok-abcdef1234567890").unwrap();

        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token, "tok-abcdef1234567890");
        assert!(!session.saved_at.is_empty());
    }

    /// Test: a fresh store instance over the same path sees the token.
    #[test]
    fn test_load_from_fresh_store() {
        let dir = tempdir().unwrap();
        store_in(&dir).set("tok-abcdef1234567890").unwrap();

        let session = store_in(&dir).load().unwrap().unwrap();
        assert_eq!(session.token, "tok-abcdef1234567890");
    }

    /// Test: load with no session file returns None.
    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    /// Test: clear removes the file and reports whether one existed.
    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.clear().unwrap());

        store.set("tok-abcdef1234567890").unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    /// Test: set creates missing parent directories.
    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store.set("tok-abcdef1234567890").unwrap();
        assert!(store.load().unwrap().is_some());
    }

    /// Test: a corrupt session file is an error, not a silent logout.
    #[test]
    fn test_corrupt_file_errors() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.load().is_err());
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(
            mask_token("eyJhbGciOiJIUzI1NiJ9.payload.sig"),
            "eyJhbGciOiJI..."
        );
        assert_eq!(mask_token("short"), "***");
    }
}
