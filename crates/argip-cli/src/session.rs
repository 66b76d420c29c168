//! Token store backends.
//!
//! The bearer token is the only state the CLI keeps between invocations. It is
//! stored verbatim: no shape or expiry checks happen locally, and a stale token is
//! only discovered when the server answers 401.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Persisted bearer token shared by every API call.
pub(crate) trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any previous value.
    fn set(&self, token: &str) -> Result<()>;

    /// The stored token, if any.
    fn get(&self) -> Option<String>;

    /// Forget the stored token. Removing an absent token is not an error.
    fn remove(&self) -> Result<()>;

    /// Whether a token is present.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// Token store backed by a single file (default `$HOME/.argip/token`).
#[derive(Debug, Clone)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user's home directory, falling back to the
    /// working directory when `HOME` is unset.
    pub(crate) fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
            .join(".argip")
            .join("token")
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = open_private(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(token.as_bytes())
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

/// In-memory token store used by command tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub(crate) fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token lock poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    fn remove(&self) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trips_and_clears() -> Result<()> {
        let dir = TempDir::new()?;
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));
        assert!(!store.is_authenticated());
        assert_eq!(store.get(), None);

        store.set("abc.def")?;
        assert_eq!(store.get().as_deref(), Some("abc.def"));
        assert!(store.is_authenticated());

        store.set("replaced")?;
        assert_eq!(store.get().as_deref(), Some("replaced"));

        store.remove()?;
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
        store.remove()?;
        Ok(())
    }

    #[test]
    fn blank_file_counts_as_logged_out() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("token");
        fs::write(&path, "  \n")?;
        let store = FileTokenStore::new(path);
        assert!(!store.is_authenticated());
        Ok(())
    }

    #[test]
    fn default_path_ends_in_argip_token() {
        let path = FileTokenStore::default_path();
        assert!(path.ends_with(".argip/token"));
    }

    #[test]
    fn memory_store_follows_the_same_contract() -> Result<()> {
        let store = MemoryTokenStore::default();
        assert!(!store.is_authenticated());
        store.set("t")?;
        assert_eq!(store.get().as_deref(), Some("t"));
        store.remove()?;
        assert!(!store.is_authenticated());
        assert!(MemoryTokenStore::with_token("x").is_authenticated());
        Ok(())
    }
}
