//! Root application state.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use session::User;
use session::prefs::{AccessibilityPrefs, LanguagePref};

use super::auth::AuthState;
use crate::util::{document, storage};

/// Every piece of ambient state the views share, owned by the root `App`.
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub accessibility: RwSignal<AccessibilityPrefs>,
    pub language: RwSignal<LanguagePref>,
    pub auth: RwSignal<AuthState>,
}

impl AppState {
    /// Fresh state with auth pending verification.
    #[must_use]
    pub fn new(accessibility: AccessibilityPrefs, language: LanguagePref) -> Self {
        Self {
            accessibility: RwSignal::new(accessibility),
            language: RwSignal::new(language),
            auth: RwSignal::new(AuthState::pending()),
        }
    }

    /// Initialize preferences from device storage.
    #[must_use]
    pub fn load() -> Self {
        Self::new(storage::load_accessibility(), storage::load_language())
    }

    /// Replace device preferences with any saved on `user`'s account.
    pub fn adopt_account_preferences(&self, user: &User) {
        let (accessibility, language) = account_preferences(user);
        if let Some(prefs) = accessibility {
            self.accessibility.set(prefs);
        }
        if let Some(lang) = language {
            self.language.set(lang);
        }
    }

    /// Keep preferences persisted and applied to the document as they change,
    /// and adopt account preferences whenever a different user signs in.
    pub fn sync_preferences(&self) {
        let state = *self;
        Effect::new(move |previous: Option<Option<String>>| {
            let current = state.auth.with(|auth| auth.user.as_ref().map(|user| user.id.clone()));
            if is_new_sign_in(previous.as_ref().and_then(Option::as_deref), current.as_deref()) {
                state.auth.with_untracked(|auth| {
                    if let Some(user) = &auth.user {
                        state.adopt_account_preferences(user);
                    }
                });
            }
            current
        });

        let accessibility = self.accessibility;
        Effect::new(move || {
            let prefs = accessibility.get();
            document::apply_accessibility(&prefs);
            storage::save_accessibility(&prefs);
        });

        let language = self.language;
        Effect::new(move || {
            language.with(|lang| {
                document::apply_language(lang);
                storage::save_language(lang);
            });
        });
    }
}

/// Preferences saved on the account, where present and readable.
fn account_preferences(user: &User) -> (Option<AccessibilityPrefs>, Option<LanguagePref>) {
    (user.accessibility_prefs(), user.preferred_language())
}

/// Whether the signed-in user id moved to a different user.
fn is_new_sign_in(previous: Option<&str>, current: Option<&str>) -> bool {
    current.is_some() && current != previous
}
