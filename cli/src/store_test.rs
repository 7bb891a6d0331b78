use super::*;
use session::tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenPair, clear_pair, store_pair};

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("portal-tokens-{}", uuid::Uuid::new_v4())).join("tokens.json")
}

fn pair() -> TokenPair {
    TokenPair { access_token: "acc".to_owned(), refresh_token: "ref".to_owned() }
}

#[test]
fn missing_file_reads_as_empty() {
    let store = FileTokenStore::new(temp_path());
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn tokens_survive_a_new_store_instance() {
    let path = temp_path();
    store_pair(&FileTokenStore::new(&path), &pair()).unwrap();

    let reopened = FileTokenStore::new(&path);
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).as_deref(), Some("acc"));
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).as_deref(), Some("ref"));

    clear_pair(&reopened).unwrap();
}

#[test]
fn clearing_both_tokens_deletes_the_file() {
    let path = temp_path();
    let store = FileTokenStore::new(&path);
    store_pair(&store, &pair()).unwrap();
    assert!(path.exists());

    clear_pair(&store).unwrap();

    assert!(!path.exists());
    assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
}

#[test]
fn removing_one_key_keeps_the_other() {
    let store = FileTokenStore::new(temp_path());
    store_pair(&store, &pair()).unwrap();

    store.remove(ACCESS_TOKEN_KEY).unwrap();

    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("ref"));
    clear_pair(&store).unwrap();
}

#[test]
fn corrupt_file_reads_as_empty() {
    let path = temp_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let store = FileTokenStore::new(&path);
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);

    store.set(ACCESS_TOKEN_KEY, "fresh").unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("fresh"));
    store.remove(ACCESS_TOKEN_KEY).unwrap();
}

#[cfg(unix)]
#[test]
fn token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_path();
    let store = FileTokenStore::new(&path);
    store.set(ACCESS_TOKEN_KEY, "acc").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    store.remove(ACCESS_TOKEN_KEY).unwrap();
}
