//! Backend paths and request helpers shared by the HTTP implementations.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

pub const WHOAMI_PATH: &str = "/api/auth/me";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
/// `PUT` target for profile updates; same resource as [`WHOAMI_PATH`].
pub const PROFILE_PATH: &str = WHOAMI_PATH;
pub const CHANGE_PASSWORD_PATH: &str = "/api/auth/change-password";
pub const FORGOT_PASSWORD_PATH: &str = "/api/auth/forgot-password";
pub const HEALTH_PATH: &str = "/health";
pub const FEATURES_PATH: &str = "/api/features";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Join a base URL and an absolute path. An empty base yields the bare path
/// (same-origin requests from the browser).
#[must_use]
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
