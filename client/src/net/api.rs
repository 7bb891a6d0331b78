//! REST auth calls for the browser.
//!
//! Browser builds (`csr`): real HTTP calls via `gloo-net`.
//! Other builds: every call fails with a transport error, which the session
//! flows treat the same as an unreachable server.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses, network failures, and undecodable bodies map onto the
//! three [`ApiError`] variants so callers can log them distinctly.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use session::endpoints::{
    self, CHANGE_PASSWORD_PATH, FORGOT_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, REGISTER_PATH, WHOAMI_PATH,
};
use session::{
    ApiError, AuthApi, Credentials, LoginResponse, PasswordChange, PasswordReset, ProfileUpdate, Registration, User,
};

/// Base URL baked in at build time; empty means same origin.
pub const API_BASE: &str = match option_env!("PORTAL_API_BASE") {
    Some(base) => base,
    None => "",
};

/// `AuthApi` over the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base: String,
}

impl Default for HttpAuthApi {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self { base: base.to_owned() }
    }

    fn url(&self, path: &str) -> String {
        endpoints::endpoint(&self.base, path)
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
fn check_ok(resp: &gloo_net::http::Response) -> Result<(), ApiError> {
    if resp.ok() { Ok(()) } else { Err(ApiError::Status(resp.status())) }
}

#[cfg(feature = "csr")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.url(WHOAMI_PATH))
                .header("Authorization", &endpoints::bearer(access_token))
                .header("Content-Type", endpoints::JSON_CONTENT_TYPE)
                .send()
                .await
                .map_err(transport)?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(WHOAMI_PATH), access_token);
            Err(unavailable())
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(LOGIN_PATH))
                .json(credentials)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(LOGIN_PATH), credentials);
            Err(unavailable())
        }
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(REGISTER_PATH))
                .json(registration)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(REGISTER_PATH), registration);
            Err(unavailable())
        }
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(LOGOUT_PATH))
                .header("Authorization", &endpoints::bearer(access_token))
                .send()
                .await
                .map_err(transport)?;
            check_ok(&resp)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(LOGOUT_PATH), access_token);
            Err(unavailable())
        }
    }

    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::put(&self.url(PROFILE_PATH))
                .header("Authorization", &endpoints::bearer(access_token))
                .json(update)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(PROFILE_PATH), access_token, update);
            Err(unavailable())
        }
    }

    async fn change_password(&self, access_token: &str, change: &PasswordChange) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(CHANGE_PASSWORD_PATH))
                .header("Authorization", &endpoints::bearer(access_token))
                .json(change)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            check_ok(&resp)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(CHANGE_PASSWORD_PATH), access_token, change);
            Err(unavailable())
        }
    }

    async fn forgot_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(FORGOT_PASSWORD_PATH))
                .json(reset)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            check_ok(&resp)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.url(FORGOT_PASSWORD_PATH), reset);
            Err(unavailable())
        }
    }
}
