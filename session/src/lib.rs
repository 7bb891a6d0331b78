//! Session bootstrap and route gating for the accessible learning portal.
//!
//! This crate owns the logic shared by the browser `client` and the native
//! `cli`: where tokens live, how a stored session is verified against
//! `/api/auth/me`, which views a user may reach, and the preference models
//! every view reads. Transport and storage are traits so each front end
//! supplies its own (`localStorage` + `gloo-net`, or a file + `reqwest`).

pub mod endpoints;
pub mod gate;
pub mod prefs;
pub mod tokens;
pub mod user;
pub mod verify;

pub use gate::{Resolution, View, resolve};
pub use tokens::{MemoryTokenStore, TokenPair, TokenStore, TokenStoreError};
pub use user::{
    Capability, Credentials, LoginResponse, PasswordChange, PasswordReset, ProfileUpdate, Registration, Role, User,
};
pub use verify::{
    ApiError, AuthApi, RejectReason, SessionError, SessionOutcome, change_password, forgot_password, login, logout, register,
    update_profile, verify_session,
};
