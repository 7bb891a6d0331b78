//! Top navigation for signed-in users.

use leptos::prelude::*;
use session::Capability;

use crate::state::auth::AuthState;

/// Links to every signed-in view, the user's name, and a logout button.
///
/// The admin link is only drawn for users who can reach it; the router does
/// the actual gating.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let busy = RwSignal::new(false);

    let display_name = move || {
        auth.with(|state| state.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default())
    };
    let is_admin = move || auth.with(|state| state.can(Capability::Administer));

    let on_logout = move |_: leptos::ev::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let store = crate::util::storage::LocalTokenStore;
            let api = crate::net::api::HttpAuthApi::default();
            if let Err(e) = session::logout(&store, &api).await {
                log::warn!("logout did not clear stored tokens: {e}");
            }
            auth.update(AuthState::sign_out);
            busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            auth.update(AuthState::sign_out);
            busy.set(false);
        }
    };

    view! {
        <nav class="nav-bar" aria-label="Main">
            <a href="/dashboard" class="nav-bar__brand">"Learning Portal"</a>
            <ul class="nav-bar__links">
                <li><a href="/dashboard">"Dashboard"</a></li>
                <li><a href="/textbooks">"Textbooks"</a></li>
                <li><a href="/games">"Games"</a></li>
                <li><a href="/accessibility">"Accessibility"</a></li>
                <li><a href="/profile">"Profile"</a></li>
                <Show when=is_admin>
                    <li><a href="/admin">"Admin"</a></li>
                </Show>
            </ul>
            <span class="nav-bar__user">{display_name}</span>
            <button class="nav-bar__logout" on:click=on_logout disabled=move || busy.get()>
                "Log out"
            </button>
        </nav>
    }
}
