//! Session verification and the login/logout/register flows around it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `verify_session` runs once per process start, before any view is chosen.
//! Its result is the `user` value the router gates on for the rest of the
//! session.
//!
//! ERROR HANDLING
//! ==============
//! An expired token, an invalid token, an unreachable server, and an
//! unparseable body all end the same way: both tokens cleared, no user.
//! The cause is kept in [`RejectReason`] and logged as its own field so that
//! collapse stays visible. No step here retries.

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;

use async_trait::async_trait;

use crate::tokens::{self, TokenPair, TokenStore, TokenStoreError};
use crate::user::{Credentials, LoginResponse, PasswordChange, PasswordReset, ProfileUpdate, Registration, User};

/// Failure talking to the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server returned status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// A 2xx response whose body did not decode.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Transport seam for the auth endpoints.
///
/// `?Send` because the browser implementation's futures hold JS handles.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET /api/auth/me` with `Authorization: Bearer <token>`.
    async fn whoami(&self, access_token: &str) -> Result<User, ApiError>;

    /// `POST /api/auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `POST /api/auth/register`.
    async fn register(&self, registration: &Registration) -> Result<User, ApiError>;

    /// `POST /api/auth/logout`.
    async fn logout(&self, access_token: &str) -> Result<(), ApiError>;

    /// `PUT /api/auth/me`; returns the updated user.
    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> Result<User, ApiError>;

    /// `POST /api/auth/change-password`.
    async fn change_password(&self, access_token: &str, change: &PasswordChange) -> Result<(), ApiError>;

    /// `POST /api/auth/forgot-password`. Succeeds whether or not the address
    /// has an account.
    async fn forgot_password(&self, reset: &PasswordReset) -> Result<(), ApiError>;
}

/// Why a stored session was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Status(u16),
    Transport(String),
    Decode(String),
}

impl From<ApiError> for RejectReason {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status(status) => Self::Status(status),
            ApiError::Transport(msg) => Self::Transport(msg),
            ApiError::Decode(msg) => Self::Decode(msg),
        }
    }
}

/// Result of [`verify_session`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// No access token was stored; no request was made.
    NoToken,
    /// The stored token identified this user.
    Verified(User),
    /// The stored tokens were cleared.
    Rejected(RejectReason),
}

impl SessionOutcome {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Verified(user) => Some(user),
            Self::NoToken | Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Verified(user) => Some(user),
            Self::NoToken | Self::Rejected(_) => None,
        }
    }
}

/// Restore the session from stored tokens.
///
/// Makes at most one `whoami` call. Any failure clears both tokens.
pub async fn verify_session<S, A>(store: &S, api: &A) -> SessionOutcome
where
    S: TokenStore + ?Sized,
    A: AuthApi + ?Sized,
{
    let Some(token) = tokens::access_token(store) else {
        tracing::debug!("no stored access token; starting signed out");
        return SessionOutcome::NoToken;
    };

    match api.whoami(&token).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, role = %user.role, "session restored");
            SessionOutcome::Verified(user)
        }
        Err(err) => {
            match &err {
                ApiError::Status(status) => {
                    tracing::warn!(status = *status, "session rejected by server; signing out");
                }
                ApiError::Transport(e) => {
                    tracing::warn!(error = %e, "session check unreachable; signing out");
                }
                ApiError::Decode(e) => {
                    tracing::warn!(error = %e, "session check returned bad body; signing out");
                }
            }
            if let Err(e) = tokens::clear_pair(store) {
                tracing::error!(error = %e, "failed to clear stored tokens");
            }
            SessionOutcome::Rejected(err.into())
        }
    }
}

/// Failure of a login, registration, or logout action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("not signed in")]
    SignedOut,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

impl SessionError {
    /// Message suitable for a login/register form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(reason) => (*reason).to_owned(),
            Self::SignedOut => "Your session has ended. Please sign in again.".to_owned(),
            Self::Api(ApiError::Status(401)) => "Incorrect email or password.".to_owned(),
            Self::Api(ApiError::Status(400)) => "The server rejected the request.".to_owned(),
            Self::Api(ApiError::Status(status)) => format!("Server error ({status})."),
            Self::Api(ApiError::Transport(_)) => "Could not reach the server.".to_owned(),
            Self::Api(ApiError::Decode(_)) => "Unexpected response from the server.".to_owned(),
            Self::Store(_) => "Could not save your session on this device.".to_owned(),
        }
    }
}

/// Sign in and persist the issued token pair.
///
/// # Errors
///
/// Returns [`SessionError::Invalid`] before any request when the credentials
/// are malformed, [`SessionError::Api`] when the server refuses, and
/// [`SessionError::Store`] when the tokens could not be saved.
pub async fn login<S, A>(store: &S, api: &A, credentials: &Credentials) -> Result<User, SessionError>
where
    S: TokenStore + ?Sized,
    A: AuthApi + ?Sized,
{
    credentials.validate().map_err(SessionError::Invalid)?;
    let resp = api.login(credentials).await?;
    let pair = TokenPair { access_token: resp.access_token, refresh_token: resp.refresh_token };
    tokens::store_pair(store, &pair)?;
    tracing::info!(user_id = %resp.user.id, role = %resp.user.role, "signed in");
    Ok(resp.user)
}

/// Create an account. Does not sign in; the caller sends the user to login.
///
/// # Errors
///
/// Returns [`SessionError::Invalid`] for local validation failures and
/// [`SessionError::Api`] when the server refuses.
pub async fn register<A>(api: &A, registration: &Registration) -> Result<User, SessionError>
where
    A: AuthApi + ?Sized,
{
    registration.validate().map_err(SessionError::Invalid)?;
    let user = api.register(registration).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "account registered");
    Ok(user)
}

/// Sign out: tell the server (best effort), then clear both tokens.
///
/// # Errors
///
/// Returns [`SessionError::Store`] only if the local tokens could not be
/// removed; server errors are logged and ignored.
pub async fn logout<S, A>(store: &S, api: &A) -> Result<(), SessionError>
where
    S: TokenStore + ?Sized,
    A: AuthApi + ?Sized,
{
    if let Some(token) = tokens::access_token(store) {
        if let Err(e) = api.logout(&token).await {
            tracing::warn!(error = %e, "server logout failed; clearing local session anyway");
        }
    }
    tokens::clear_pair(store)?;
    tracing::info!("signed out");
    Ok(())
}

/// Save profile changes and return the user as the server now has it.
///
/// # Errors
///
/// Returns [`SessionError::Invalid`] for an empty or malformed update,
/// [`SessionError::SignedOut`] when no access token is stored, and
/// [`SessionError::Api`] when the server refuses.
pub async fn update_profile<S, A>(store: &S, api: &A, update: &ProfileUpdate) -> Result<User, SessionError>
where
    S: TokenStore + ?Sized,
    A: AuthApi + ?Sized,
{
    update.validate().map_err(SessionError::Invalid)?;
    let token = tokens::access_token(store).ok_or(SessionError::SignedOut)?;
    let user = api.update_profile(&token, update).await?;
    tracing::info!(user_id = %user.id, "profile updated");
    Ok(user)
}

/// Change the signed-in user's password. Stored tokens stay valid.
///
/// # Errors
///
/// Returns [`SessionError::Invalid`] for local validation failures,
/// [`SessionError::SignedOut`] without a stored token, and
/// [`SessionError::Api`] when the server refuses (a wrong current password
/// is a 400).
pub async fn change_password<S, A>(store: &S, api: &A, change: &PasswordChange) -> Result<(), SessionError>
where
    S: TokenStore + ?Sized,
    A: AuthApi + ?Sized,
{
    change.validate().map_err(SessionError::Invalid)?;
    let token = tokens::access_token(store).ok_or(SessionError::SignedOut)?;
    api.change_password(&token, change).await?;
    tracing::info!("password changed");
    Ok(())
}

/// Ask the backend to email a reset link. Needs no session.
///
/// # Errors
///
/// Returns [`SessionError::Invalid`] for a malformed address and
/// [`SessionError::Api`] when the request fails.
pub async fn forgot_password<A>(api: &A, reset: &PasswordReset) -> Result<(), SessionError>
where
    A: AuthApi + ?Sized,
{
    reset.validate().map_err(SessionError::Invalid)?;
    api.forgot_password(reset).await?;
    tracing::info!("password reset requested");
    Ok(())
}
