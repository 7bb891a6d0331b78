use super::*;

/// Store that accepts the access token but rejects the refresh token.
#[derive(Default)]
struct HalfBrokenStore {
    inner: MemoryTokenStore,
}

impl TokenStore for HalfBrokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        if key == REFRESH_TOKEN_KEY {
            return Err(TokenStoreError::Write("quota exceeded".to_owned()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        self.inner.remove(key)
    }
}

/// Store whose access-token delete always fails.
#[derive(Default)]
struct StuckAccessStore {
    inner: MemoryTokenStore,
}

impl TokenStore for StuckAccessStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        if key == ACCESS_TOKEN_KEY {
            return Err(TokenStoreError::Unavailable);
        }
        self.inner.remove(key)
    }
}

fn pair() -> TokenPair {
    TokenPair { access_token: "acc".to_owned(), refresh_token: "ref".to_owned() }
}

// =============================================================================
// keys
// =============================================================================

#[test]
fn storage_keys_are_fixed() {
    assert_eq!(ACCESS_TOKEN_KEY, "accessToken");
    assert_eq!(REFRESH_TOKEN_KEY, "refreshToken");
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

#[test]
fn memory_store_get_set_remove() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k").unwrap();
    assert_eq!(store.get("k"), None);
}

#[test]
fn memory_store_remove_missing_is_ok() {
    let store = MemoryTokenStore::new();
    assert!(store.remove("missing").is_ok());
}

#[test]
fn memory_store_with_pair_populates_both_keys() {
    let store = MemoryTokenStore::with_pair("a", "r");
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("a"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("r"));
}

// =============================================================================
// pair helpers
// =============================================================================

#[test]
fn access_token_treats_empty_as_absent() {
    let store = MemoryTokenStore::new();
    store.set(ACCESS_TOKEN_KEY, "").unwrap();
    assert_eq!(access_token(&store), None);
}

#[test]
fn store_pair_writes_both_keys() {
    let store = MemoryTokenStore::new();
    store_pair(&store, &pair()).unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("acc"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("ref"));
}

#[test]
fn clear_pair_removes_both_tokens() {
    let store = MemoryTokenStore::with_pair("a", "r");
    clear_pair(&store).unwrap();
    assert!(store.is_empty());
}

#[test]
fn clear_pair_still_removes_refresh_when_access_delete_fails() {
    let store = StuckAccessStore::default();
    store_pair(&store, &pair()).unwrap();

    let err = clear_pair(&store).unwrap_err();

    assert_eq!(err, TokenStoreError::Unavailable);
    assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("acc"));
}

#[test]
fn store_pair_rolls_back_access_token_when_refresh_write_fails() {
    let store = HalfBrokenStore::default();
    let err = store_pair(&store, &pair()).unwrap_err();
    assert_eq!(err, TokenStoreError::Write("quota exceeded".to_owned()));
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    assert!(store.inner.is_empty());
}

#[test]
fn token_store_is_implemented_for_references() {
    let store = MemoryTokenStore::new();
    let by_ref = &store;
    store_pair(&by_ref, &pair()).unwrap();
    assert_eq!(access_token(&store).as_deref(), Some("acc"));
}
