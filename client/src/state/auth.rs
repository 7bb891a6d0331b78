//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router gates on `user`; the app shell shows a spinner while `loading`.
//! `loading` starts true and drops exactly once, when session verification
//! finishes. After that only login and logout move `user`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{Capability, User};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before session verification has finished.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    /// State once verification settled on `user`.
    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the current user holds `capability`. Signed out holds nothing.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.user.as_ref().is_some_and(|user| user.can(capability))
    }
}
