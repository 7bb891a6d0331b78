//! Browser `localStorage` access for tokens and preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the portal persists on the device goes through here: the
//! session token pair (via [`LocalTokenStore`]) and the two preference
//! records. Outside the browser (`csr` disabled) reads come back empty and
//! writes report the store as unavailable.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::prefs::{ACCESSIBILITY_KEY, AccessibilityPrefs, LANGUAGE_KEY, LanguagePref};
use session::{TokenStore, TokenStoreError};

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read_raw(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        local_storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

fn write_raw(key: &str, value: &str) -> Result<(), TokenStoreError> {
    #[cfg(feature = "csr")]
    {
        let storage = local_storage().ok_or(TokenStoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| TokenStoreError::Write(format!("{e:?}")))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
        Err(TokenStoreError::Unavailable)
    }
}

fn remove_raw(key: &str) -> Result<(), TokenStoreError> {
    #[cfg(feature = "csr")]
    {
        let storage = local_storage().ok_or(TokenStoreError::Unavailable)?;
        storage.remove_item(key).map_err(|e| TokenStoreError::Write(format!("{e:?}")))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        Err(TokenStoreError::Unavailable)
    }
}

/// Token store backed by the page origin's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        read_raw(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        write_raw(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        remove_raw(key)
    }
}

/// Stored accessibility preferences, or defaults.
pub fn load_accessibility() -> AccessibilityPrefs {
    AccessibilityPrefs::from_stored(read_raw(ACCESSIBILITY_KEY).as_deref())
}

pub fn save_accessibility(prefs: &AccessibilityPrefs) {
    if let Err(e) = write_raw(ACCESSIBILITY_KEY, &prefs.to_stored()) {
        log::warn!("accessibility preferences not saved: {e}");
    }
}

/// Stored interface language, or the default.
pub fn load_language() -> LanguagePref {
    LanguagePref::from_stored(read_raw(LANGUAGE_KEY).as_deref())
}

pub fn save_language(language: &LanguagePref) {
    if let Err(e) = write_raw(LANGUAGE_KEY, language.code()) {
        log::warn!("language preference not saved: {e}");
    }
}
