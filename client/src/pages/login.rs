//! Email + password login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! On success the user lands in the auth signal; the router then moves the
//! page off `/login` on its own, so this page never navigates itself.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::Credentials;

use crate::state::auth::AuthState;

/// Trim form input and check it before sending.
fn credentials_from_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let credentials = Credentials { email: email.trim().to_owned(), password: password.to_owned() };
    credentials.validate()?;
    Ok(credentials)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match credentials_from_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(reason) => {
                info.set(reason.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let store = crate::util::storage::LocalTokenStore;
            let api = crate::net::api::HttpAuthApi::default();
            match session::login(&store, &api, &credentials).await {
                Ok(user) => {
                    info.set(String::new());
                    auth.update(|state| state.sign_in(user));
                }
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = (auth, credentials);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Learning Portal"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message" role="alert">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "New here? " <a href="/register">"Create an account"</a>
                </p>
                <p class="login-card__footer">
                    <a href="/forgot-password">"Forgot your password?"</a>
                </p>
            </div>
        </div>
    }
}
