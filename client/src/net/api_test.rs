use super::*;

#[test]
fn url_joins_base_and_path() {
    let api = HttpAuthApi::new("https://portal.example.org/");
    assert_eq!(api.url(WHOAMI_PATH), "https://portal.example.org/api/auth/me");
}

#[test]
fn url_with_empty_base_is_same_origin() {
    assert_eq!(HttpAuthApi::new("").url(LOGIN_PATH), "/api/auth/login");
}

#[tokio::test]
async fn calls_outside_browser_are_transport_errors() {
    let api = HttpAuthApi::default();
    assert!(matches!(api.whoami("abc").await, Err(ApiError::Transport(_))));
    assert!(matches!(api.logout("abc").await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn account_calls_outside_browser_are_transport_errors() {
    let api = HttpAuthApi::default();
    let update = ProfileUpdate { language: Some("fr".to_owned()), ..ProfileUpdate::default() };
    assert!(matches!(api.update_profile("abc", &update).await, Err(ApiError::Transport(_))));
    let reset = PasswordReset { email: "s@school.org".to_owned() };
    assert!(matches!(api.forgot_password(&reset).await, Err(ApiError::Transport(_))));
}

#[test]
fn account_urls_use_auth_prefix() {
    let api = HttpAuthApi::new("https://portal.example.org");
    assert_eq!(api.url(PROFILE_PATH), "https://portal.example.org/api/auth/me");
    assert_eq!(api.url(CHANGE_PASSWORD_PATH), "https://portal.example.org/api/auth/change-password");
}
