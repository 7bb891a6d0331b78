//! Public form that asks the backend to email a password reset link.
//!
//! The backend answers the same way whether or not the address has an
//! account, so the page shows one confirmation for every accepted request.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;
use session::PasswordReset;

const SENT_MESSAGE: &str = "If that address has an account, a reset link is on its way.";

fn reset_from_input(email: &str) -> Result<PasswordReset, &'static str> {
    let reset = PasswordReset { email: email.trim().to_owned() };
    reset.validate()?;
    Ok(reset)
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let reset = match reset_from_input(&email.get_untracked()) {
            Ok(reset) => reset,
            Err(reason) => {
                info.set(reason.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::HttpAuthApi::default();
            match session::forgot_password(&api, &reset).await {
                Ok(()) => info.set(SENT_MESSAGE.to_owned()),
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = reset;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset your password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <label for="forgot-email">"Email"</label>
                    <input
                        id="forgot-email"
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send reset link"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message" role="status">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    <a href="/login">"Back to sign in"</a>
                </p>
            </div>
        </div>
    }
}
