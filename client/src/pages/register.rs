//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{Registration, Role};

/// Roles a visitor may pick for themselves. Admins are created by admins.
const SELF_SERVICE_ROLES: [Role; 2] = [Role::Student, Role::Teacher];

fn parse_role(raw: &str) -> Role {
    SELF_SERVICE_ROLES.into_iter().find(|role| role.as_str() == raw).unwrap_or(Role::Student)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = Registration {
            email: email.get().trim().to_owned(),
            password: password.get(),
            confirm_password: confirm.get(),
            full_name: full_name.get().trim().to_owned(),
            role: role.get(),
        };
        if let Err(reason) = registration.validate() {
            info.set(reason.to_owned());
            return;
        }
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let api = crate::net::api::HttpAuthApi::default();
                match session::register(&api, &registration).await {
                    Ok(_) => navigate("/login", NavigateOptions::default()),
                    Err(e) => {
                        info.set(e.user_message());
                        busy.set(false);
                    }
                }
            });
        }

        #[cfg(not(feature = "csr"))]
        {
            let _ = (&navigate, registration, NavigateOptions::default());
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <label for="register-name">"Full name"</label>
                    <input
                        id="register-name"
                        class="login-input"
                        type="text"
                        autocomplete="name"
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                    <label for="register-email">"Email"</label>
                    <input
                        id="register-email"
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="register-password">"Password"</label>
                    <input
                        id="register-password"
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label for="register-confirm">"Confirm password"</label>
                    <input
                        id="register-confirm"
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <label for="register-role">"I am a"</label>
                    <select
                        id="register-role"
                        class="login-input"
                        on:change=move |ev| role.set(parse_role(&event_target_value(&ev)))
                    >
                        {SELF_SERVICE_ROLES
                            .into_iter()
                            .map(|r| {
                                view! {
                                    <option value=r.as_str() selected=move || role.get() == r>
                                        {r.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message" role="alert">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
