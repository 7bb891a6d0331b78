use super::*;
use session::tokens::ACCESS_TOKEN_KEY;

// Without the `csr` feature there is no browser storage behind these calls.

#[test]
fn local_store_reads_nothing_outside_browser() {
    assert_eq!(LocalTokenStore.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn local_store_writes_report_unavailable_outside_browser() {
    assert_eq!(LocalTokenStore.set(ACCESS_TOKEN_KEY, "abc"), Err(TokenStoreError::Unavailable));
    assert_eq!(LocalTokenStore.remove(ACCESS_TOKEN_KEY), Err(TokenStoreError::Unavailable));
}

#[test]
fn preferences_load_defaults_outside_browser() {
    assert_eq!(load_accessibility(), AccessibilityPrefs::default());
    assert_eq!(load_language(), LanguagePref::default());
}

#[tokio::test]
async fn verify_with_local_store_outside_browser_makes_no_request() {
    let outcome = session::verify_session(&LocalTokenStore, &crate::net::api::HttpAuthApi::default()).await;
    assert_eq!(outcome, session::SessionOutcome::NoToken);
}
