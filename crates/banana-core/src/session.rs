//! Session storage and retrieval.
//!
//! Stores the current session in `<base>/session.json` with restricted
//! permissions (0600). Token values are never logged in full.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::paths;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the remembered username.
pub const USERNAME_KEY: &str = "username";

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY];

/// Key/value persistence port backing the session store.
///
/// Implementations must make writes durable before returning, and must
/// apply multi-key writes/removals as a single save so a token pair can
/// never be observed half-written after a crash.
pub trait Storage {
    /// Reads a value. Re-reads the backing store; no caching.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes all entries durably in one save.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()>;
    /// Removes all keys durably in one save. Missing keys are not an error.
    fn remove_all(&mut self, keys: &[&str]) -> Result<()>;
}

/// File-backed storage: a flat JSON string map on disk.
///
/// Every read goes back to the file, so a value written by another
/// process (or cleared by a concurrent logout) is picked up on the next
/// access rather than served from a stale cache.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
        }
    }

    /// Opens storage at the default session path.
    pub fn open_default() -> Self {
        Self::new(paths::session_path())
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    /// Saves the whole map with restricted permissions (0600).
    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize session")?;

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
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                tracing::warn!("unreadable session file: {err:#}");
                None
            }
        }
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.load()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.save(&map)
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut map = self.load().unwrap_or_default();
        let mut changed = false;
        for key in keys {
            changed |= map.remove(*key).is_some();
        }
        if !changed && self.path.exists() {
            // Nothing to do, but clearing must still succeed.
            return Ok(());
        }
        self.save(&map)
    }
}

/// In-memory storage for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// The client's current belief about who is logged in.
///
/// A remembered username alone never counts as authenticated; at least
/// one credential must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl Session {
    /// Returns true if at least one credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.access.is_some() || self.refresh.is_some()
    }

    /// Returns true if an access token is available for bearer calls.
    pub fn has_access(&self) -> bool {
        self.access.is_some()
    }
}

/// Typed view over the persistence port.
///
/// Owns the session exclusively; the API client writes through it on
/// login/register success and clears it on logout.
#[derive(Debug)]
pub struct SessionStore<S> {
    backend: S,
}

impl SessionStore<FileStorage> {
    /// Opens the store over the default on-disk session file.
    pub fn open_default() -> Self {
        Self::new(FileStorage::open_default())
    }
}

impl<S: Storage> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
        }
    }

    /// Reads the current session from the backend.
    ///
    /// Empty strings are treated as absent so a blanked-out token can
    /// never pass an authentication gate.
    pub fn session(&self) -> Session {
        Session {
            username: non_empty(self.backend.get(USERNAME_KEY)),
            access: non_empty(self.backend.get(ACCESS_TOKEN_KEY)),
            refresh: non_empty(self.backend.get(REFRESH_TOKEN_KEY)),
        }
    }

    /// Stores both tokens in a single durable write.
    pub fn set_tokens(&mut self, access: &str, refresh: &str) -> Result<()> {
        self.backend
            .set_all(&[(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)])
    }

    /// Remembers the username for greeting and ranking display.
    pub fn set_username(&mut self, name: &str) -> Result<()> {
        self.backend.set_all(&[(USERNAME_KEY, name)])
    }

    /// Removes all session entries. Idempotent: clearing an empty store
    /// is a no-op, not an error.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove_all(&SESSION_KEYS)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
