//! `AuthApi` over `reqwest`, plus the unauthenticated info endpoints.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use session::endpoints::{
    self, CHANGE_PASSWORD_PATH, FEATURES_PATH, FORGOT_PASSWORD_PATH, HEALTH_PATH, JSON_CONTENT_TYPE, LOGIN_PATH,
    LOGOUT_PATH, PROFILE_PATH, REGISTER_PATH, WHOAMI_PATH,
};
use session::{
    ApiError, AuthApi, Credentials, LoginResponse, PasswordChange, PasswordReset, ProfileUpdate, Registration, User,
};

#[derive(Debug, Clone)]
pub struct ReqwestAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestAuthApi {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.to_owned() }
    }

    fn url(&self, path: &str) -> String {
        endpoints::endpoint(&self.base_url, path)
    }

    /// `GET` an informational endpoint and return its JSON body.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.client.get(self.url(path)).send().await.map_err(transport)?;
        decode(resp).await
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get_json(HEALTH_PATH).await
    }

    pub async fn features(&self) -> Result<Value, ApiError> {
        self.get_json(FEATURES_PATH).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() { Ok(()) } else { Err(ApiError::Status(status.as_u16())) }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    check_status(resp.status())?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AuthApi for ReqwestAuthApi {
    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        let resp = self
            .client
            .get(self.url(WHOAMI_PATH))
            .header(AUTHORIZATION, endpoints::bearer(access_token))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let resp = self.client.post(self.url(LOGIN_PATH)).json(credentials).send().await.map_err(transport)?;
        decode(resp).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let resp = self.client.post(self.url(REGISTER_PATH)).json(registration).send().await.map_err(transport)?;
        decode(resp).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url(LOGOUT_PATH))
            .header(AUTHORIZATION, endpoints::bearer(access_token))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp.status())
    }

    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        let resp = self
            .client
            .put(self.url(PROFILE_PATH))
            .header(AUTHORIZATION, endpoints::bearer(access_token))
            .json(update)
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    async fn change_password(&self, access_token: &str, change: &PasswordChange) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url(CHANGE_PASSWORD_PATH))
            .header(AUTHORIZATION, endpoints::bearer(access_token))
            .json(change)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp.status())
    }

    async fn forgot_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        let resp = self.client.post(self.url(FORGOT_PASSWORD_PATH)).json(reset).send().await.map_err(transport)?;
        check_status(resp.status())
    }
}
