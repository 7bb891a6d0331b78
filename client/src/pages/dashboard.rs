//! Signed-in landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Greeting plus shortcuts into the main sections.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let greeting = move || {
        auth.with(|state| {
            state
                .user
                .as_ref()
                .map(|user| format!("Welcome back, {}", user.display_name()))
                .unwrap_or_default()
        })
    };
    let role = move || auth.with(|state| state.user.as_ref().map(|user| user.role.as_str()).unwrap_or_default());

    view! {
        <section class="dashboard-page">
            <h1>{greeting}</h1>
            <p class="dashboard-page__role">"Signed in as " {role}</p>
            <div class="dashboard-page__tiles">
                <a href="/textbooks" class="dashboard-tile">"Textbooks"</a>
                <a href="/games" class="dashboard-tile">"Learning games"</a>
                <a href="/accessibility" class="dashboard-tile">"Reading settings"</a>
            </div>
        </section>
    }
}
