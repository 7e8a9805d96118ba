//! Auth token storage.
//!
//! The client persists exactly one opaque token string. The file-backed
//! store keeps it as TOML under the platform config directory; the
//! in-memory store exists for tests and ephemeral sessions.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use dukkan_core::catalog::TokenStore;
use dukkan_core::error::{DukkanError, Result};

/// The single well-known key the token lives under.
const TOKEN_KEY_FILE: &str = "credentials.toml";

#[derive(Debug, Serialize, Deserialize)]
struct Credentials {
    auth_token: String,
}

/// Token store persisted at `~/.config/dukkan/credentials.toml`.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default platform config path.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DukkanError::config("could not determine config directory"))?;
        Ok(Self {
            path: config_dir.join("dukkan").join(TOKEN_KEY_FILE),
        })
    }

    /// Creates a store at an explicit path (used by tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file the token is stored in.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let credentials: Credentials = toml::from_str(&content).ok()?;
        Some(credentials.auth_token)
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&Credentials {
            auth_token: token.to_string(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("token lock poisoned") = None;
        Ok(())
    }
}
