//! Administration page. Only reachable for users holding
//! `Capability::Administer`; the route is absent for everyone else.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let admin_id = move || auth.with(|state| state.user.as_ref().map(|u| u.id.clone()).unwrap_or_default());

    view! {
        <section class="admin-page">
            <h1>"Administration"</h1>
            <p>"Signed in as administrator " <code>{admin_id}</code></p>
            <p>"User management and content moderation tools live here."</p>
        </section>
    }
}
