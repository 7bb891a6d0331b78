use super::*;

#[test]
fn endpoint_with_empty_base_is_same_origin() {
    assert_eq!(endpoint("", WHOAMI_PATH), "/api/auth/me");
}

#[test]
fn endpoint_trims_trailing_slashes() {
    assert_eq!(endpoint("http://127.0.0.1:8000//", LOGIN_PATH), "http://127.0.0.1:8000/api/auth/login");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}
