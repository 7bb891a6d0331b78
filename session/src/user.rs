//! User identity, roles, and auth request/response DTOs.
//!
//! DESIGN
//! ======
//! Only `id` and `role` drive session and routing decisions. Everything else
//! the backend returns about a user (profile, accessibility settings, login
//! stats) rides along untouched in `extra` so views can read it without this
//! crate knowing its schema.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::prefs::{AccessibilityPrefs, LanguagePref};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Account fields holding the preferences saved with the profile.
pub const ACCESSIBILITY_FIELD: &str = "accessibility_preferences";
pub const LANGUAGE_FIELD: &str = "preferred_language";

/// Account role assigned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

/// Something a route may require of the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Reach the administration view.
    Administer,
}

impl Role {
    /// Capability set granted by this role.
    #[must_use]
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Student | Self::Teacher => &[],
            Self::Admin => &[Capability::Administer],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user as returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Profile and accessibility fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role, email: None, full_name: None, extra: Map::new() }
    }

    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.role.capabilities().contains(&capability)
    }

    /// Name to greet the user with: full name, then email, then id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    /// Accessibility preferences saved on the account, if any are readable.
    #[must_use]
    pub fn accessibility_prefs(&self) -> Option<AccessibilityPrefs> {
        let raw = self.extra.get(ACCESSIBILITY_FIELD)?;
        serde_json::from_value::<AccessibilityPrefs>(raw.clone()).ok().map(AccessibilityPrefs::sanitized)
    }

    /// Interface language saved on the account, if it is a supported one.
    #[must_use]
    pub fn preferred_language(&self) -> Option<LanguagePref> {
        self.extra.get(LANGUAGE_FIELD)?.as_str().and_then(LanguagePref::parse)
    }
}

/// Email + password login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Check the fields the backend would reject before spending a request.
    ///
    /// # Errors
    ///
    /// Returns a short human-readable reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

/// Account registration request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub role: Role,
}

impl Registration {
    /// # Errors
    ///
    /// Returns a short human-readable reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.full_name.trim().is_empty() {
            return Err("full name is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            return Err("passwords do not match");
        }
        Ok(())
    }
}

/// Partial profile update for `PUT /api/auth/me`. Absent fields are left
/// unchanged by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "preferred_language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "accessibility_preferences", skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityPrefs>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.language.is_none() && self.accessibility.is_none()
    }

    /// # Errors
    ///
    /// Returns a short human-readable reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_empty() {
            return Err("nothing to update");
        }
        if self.full_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err("full name cannot be blank");
        }
        if self.language.as_deref().is_some_and(|code| LanguagePref::parse(code).is_none()) {
            return Err("unsupported language");
        }
        Ok(())
    }
}

/// Body of `POST /api/auth/change-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// # Errors
    ///
    /// Returns a short human-readable reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.current_password.is_empty() {
            return Err("current password is required");
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err("password must be at least 8 characters");
        }
        if self.new_password == self.current_password {
            return Err("new password must differ from the current one");
        }
        Ok(())
    }
}

/// Body of `POST /api/auth/forgot-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    pub email: String,
}

impl PasswordReset {
    /// # Errors
    ///
    /// Returns a short human-readable reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)
    }
}

/// Body of a successful `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("email is not valid"),
    }
}
