//! Profile page: account details, interface language, and password change.
//!
//! SYSTEM CONTEXT
//! ==============
//! Name and language edits are saved to the account with
//! `session::update_profile`; the returned user replaces the one in the auth
//! signal. The language also changes locally right away, so a failed save
//! only loses the account copy.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use session::prefs::{LanguagePref, SUPPORTED_LANGUAGES};
use session::{PasswordChange, ProfileUpdate};

use crate::state::auth::AuthState;

/// Build a name update, or a reason to not send one.
fn name_update(current: Option<&str>, input: &str) -> Result<ProfileUpdate, &'static str> {
    let full_name = input.trim();
    if current.is_some_and(|name| name == full_name) {
        return Err("That is already your name.");
    }
    let update = ProfileUpdate { full_name: Some(full_name.to_owned()), ..ProfileUpdate::default() };
    update.validate()?;
    Ok(update)
}

/// Check the confirm field, then the password rules.
fn password_change_from_input(current: &str, new: &str, confirm: &str) -> Result<PasswordChange, &'static str> {
    if new != confirm {
        return Err("passwords do not match");
    }
    let change = PasswordChange { current_password: current.to_owned(), new_password: new.to_owned() };
    change.validate()?;
    Ok(change)
}

/// Send `update` for the signed-in user and report into `info`.
fn save_update(auth: RwSignal<AuthState>, info: RwSignal<String>, update: ProfileUpdate) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let store = crate::util::storage::LocalTokenStore;
        let api = crate::net::api::HttpAuthApi::default();
        match session::update_profile(&store, &api, &update).await {
            Ok(user) => {
                auth.update(|state| state.sign_in(user));
                info.set("Profile saved.".to_owned());
            }
            Err(e) => {
                log::warn!("profile update failed: {e}");
                info.set(e.user_message());
            }
        }
    });

    #[cfg(not(feature = "csr"))]
    {
        let _ = (auth, update);
        info.set("Profile changes need the browser app.".to_owned());
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let language = expect_context::<RwSignal<LanguagePref>>();

    let field = move |pick: fn(&session::User) -> Option<String>| {
        move || auth.with(|state| state.user.as_ref().and_then(pick).unwrap_or_else(|| "Not set".to_owned()))
    };
    let email = field(|user| user.email.clone());
    let role = field(|user| Some(user.role.to_string()));

    let name_input = RwSignal::new(auth.with_untracked(|state| {
        state.user.as_ref().and_then(|user| user.full_name.clone()).unwrap_or_default()
    }));
    let profile_info = RwSignal::new(String::new());

    let on_name = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = auth.with_untracked(|state| state.user.as_ref().and_then(|user| user.full_name.clone()));
        match name_update(current.as_deref(), &name_input.get_untracked()) {
            Ok(update) => save_update(auth, profile_info, update),
            Err(reason) => profile_info.set(reason.to_owned()),
        }
    };

    let on_language = move |ev: leptos::ev::Event| {
        if let Some(lang) = LanguagePref::parse(&event_target_value(&ev)) {
            let update = ProfileUpdate { language: Some(lang.code().to_owned()), ..ProfileUpdate::default() };
            language.set(lang);
            save_update(auth, profile_info, update);
        }
    };

    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let password_info = RwSignal::new(String::new());
    let password_busy = RwSignal::new(false);

    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if password_busy.get_untracked() {
            return;
        }
        let change = match password_change_from_input(
            &current_password.get_untracked(),
            &new_password.get_untracked(),
            &confirm_password.get_untracked(),
        ) {
            Ok(change) => change,
            Err(reason) => {
                password_info.set(reason.to_owned());
                return;
            }
        };
        password_busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let store = crate::util::storage::LocalTokenStore;
            let api = crate::net::api::HttpAuthApi::default();
            match session::change_password(&store, &api, &change).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    password_info.set("Password changed.".to_owned());
                }
                Err(session::SessionError::Api(session::ApiError::Status(400))) => {
                    password_info.set("Your current password is not correct.".to_owned());
                }
                Err(e) => password_info.set(e.user_message()),
            }
            password_busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = change;
            password_busy.set(false);
        }
    };

    view! {
        <section class="profile-page">
            <h1>"Your profile"</h1>
            <dl class="profile-page__details">
                <dt>"Email"</dt>
                <dd>{email}</dd>
                <dt>"Role"</dt>
                <dd>{role}</dd>
                <dt>"Language"</dt>
                <dd>{move || language.with(LanguagePref::name)}</dd>
            </dl>

            <form class="profile-page__form" on:submit=on_name>
                <label for="profile-name">"Full name"</label>
                <input
                    id="profile-name"
                    type="text"
                    autocomplete="name"
                    prop:value=move || name_input.get()
                    on:input=move |ev| name_input.set(event_target_value(&ev))
                />
                <button type="submit">"Save name"</button>
            </form>

            <label for="profile-language">"Interface language"</label>
            <select id="profile-language" on:change=on_language>
                {SUPPORTED_LANGUAGES
                    .iter()
                    .map(|&(code, label)| {
                        view! {
                            <option value=code selected=move || language.with(|l| l.code() == code)>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <Show when=move || !profile_info.get().is_empty()>
                <p class="profile-page__message" role="status">{move || profile_info.get()}</p>
            </Show>

            <h2>"Change password"</h2>
            <form class="profile-page__form" on:submit=on_password>
                <label for="profile-current-password">"Current password"</label>
                <input
                    id="profile-current-password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || current_password.get()
                    on:input=move |ev| current_password.set(event_target_value(&ev))
                />
                <label for="profile-new-password">"New password"</label>
                <input
                    id="profile-new-password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <label for="profile-confirm-password">"Confirm new password"</label>
                <input
                    id="profile-confirm-password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || password_busy.get()>"Change password"</button>
            </form>
            <Show when=move || !password_info.get().is_empty()>
                <p class="profile-page__message" role="alert">{move || password_info.get()}</p>
            </Show>
        </section>
    }
}
