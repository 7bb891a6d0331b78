//! Persistent access/refresh token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both tokens are opaque strings kept under fixed keys in a synchronous,
//! origin-scoped key-value store. Login is the only writer and always writes
//! the pair together; verification failure and logout always clear the pair.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::cell::RefCell;
use std::collections::HashMap;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Error returned by a [`TokenStore`] backend that failed to persist a change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenStoreError {
    /// The backing store is not reachable (no `window`, storage disabled).
    #[error("token storage unavailable")]
    Unavailable,
    /// The backend rejected the write or delete.
    #[error("token storage write failed: {0}")]
    Write(String),
}

/// Synchronous key-value store holding session tokens as plain strings.
///
/// Values survive process restarts until explicitly removed. No expiry and no
/// encryption is applied.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`TokenStoreError`] if the backend could not persist the value.
    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;

    /// # Errors
    ///
    /// Returns [`TokenStoreError`] if the backend could not delete the key.
    fn remove(&self, key: &str) -> Result<(), TokenStoreError>;
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        (**self).remove(key)
    }
}

/// Access and refresh token issued together by a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Read the stored access token. An empty string counts as absent.
pub fn access_token<S: TokenStore + ?Sized>(store: &S) -> Option<String> {
    store.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Persist both tokens. If the second write fails the first is rolled back so
/// the store never holds half a pair.
///
/// # Errors
///
/// Returns the first [`TokenStoreError`] raised by the backend.
pub fn store_pair<S: TokenStore + ?Sized>(store: &S, pair: &TokenPair) -> Result<(), TokenStoreError> {
    store.set(ACCESS_TOKEN_KEY, &pair.access_token)?;
    if let Err(e) = store.set(REFRESH_TOKEN_KEY, &pair.refresh_token) {
        let _ = store.remove(ACCESS_TOKEN_KEY);
        return Err(e);
    }
    Ok(())
}

/// Remove both tokens. Both removals are attempted even if the first fails.
///
/// # Errors
///
/// Returns the first [`TokenStoreError`] raised by the backend.
pub fn clear_pair<S: TokenStore + ?Sized>(store: &S) -> Result<(), TokenStoreError> {
    let access = store.remove(ACCESS_TOKEN_KEY);
    let refresh = store.remove(REFRESH_TOKEN_KEY);
    access.and(refresh)
}

/// In-process token store. Nothing survives the process; used by tests and
/// by callers that want a throwaway session.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token pair.
    #[must_use]
    pub fn with_pair(access_token: &str, refresh_token: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.borrow_mut();
            entries.insert(ACCESS_TOKEN_KEY.to_owned(), access_token.to_owned());
            entries.insert(REFRESH_TOKEN_KEY.to_owned(), refresh_token.to_owned());
        }
        store
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
