//! File-backed token store for the terminal client.
//!
//! Tokens live in one small JSON object on disk so a session survives
//! between invocations, the same way the browser keeps them in
//! `localStorage`. The file is rewritten whole on every change and removed
//! once it holds nothing.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use session::{TokenStore, TokenStoreError};

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents. A missing or unreadable file reads as empty.
    fn read(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "token file unreadable; ignoring it");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token file could not be read");
                BTreeMap::new()
            }
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), TokenStoreError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(write_error(&e)),
            };
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| TokenStoreError::Write(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| write_error(&e))?;
        restrict_permissions(&self.path)
    }
}

fn write_error(err: &io::Error) -> TokenStoreError {
    TokenStoreError::Write(err.to_string())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), TokenStoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| write_error(&e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), TokenStoreError> {
    Ok(())
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.read();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write(&entries)
    }
}
