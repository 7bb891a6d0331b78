//! Root application component: provider composition, session bootstrap, and
//! gated routing.
//!
//! ARCHITECTURE
//! ============
//! `App` owns the single `AppState` and nests its pieces as providers:
//!
//! ```text
//! ErrorBoundary
//!   accessibility prefs
//!     language
//!       auth            <- innermost, read by the router
//!         Router / Shell
//! ```
//!
//! `Shell` resolves the current path against `session::gate` on every change
//! to the location or the auth signal and renders exactly one page or a
//! redirect.

use leptos::context::Provider;
use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Redirect, Router};
use leptos_router::hooks::use_location;
use session::gate::{self, Resolution, RouteParams, View};

use crate::components::{error_fallback::ErrorFallback, loading_spinner::LoadingSpinner, nav_bar::NavBar};
use crate::pages::{
    accessibility::AccessibilityPage,
    admin::AdminPage,
    dashboard::DashboardPage,
    forgot_password::ForgotPasswordPage,
    games::GamesPage,
    login::LoginPage,
    profile::ProfilePage,
    register::RegisterPage,
    textbooks::{TextbookListPage, TextbookViewerPage},
};
use crate::state::{app::AppState, auth::AuthState};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = AppState::load();
    state.sync_preferences();
    bootstrap_session(state.auth);

    view! {
        <Title text="Learning Portal"/>
        <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors=errors/> }>
            <Provider value=state.accessibility>
                <Provider value=state.language>
                    <Provider value=state.auth>
                        <Router>
                            <Shell/>
                        </Router>
                    </Provider>
                </Provider>
            </Provider>
        </ErrorBoundary>
    }
}

/// Verify the stored session once and settle the auth signal.
fn bootstrap_session(auth: RwSignal<AuthState>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let store = crate::util::storage::LocalTokenStore;
        let api = crate::net::api::HttpAuthApi::default();
        let outcome = session::verify_session(&store, &api).await;
        auth.set(AuthState::resolved(outcome.into_user()));
    });

    #[cfg(not(feature = "csr"))]
    auth.set(AuthState::resolved(None));
}

/// Spinner while verifying, then the gated page for the current path.
#[component]
fn Shell() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;

    move || {
        if auth.with(|state| state.loading) {
            return view! { <LoadingSpinner label="Checking your session..."/> }.into_any();
        }

        let path = pathname.get();
        let (resolution, signed_in) = auth.with(|state| (gate::resolve(&path, state.user.as_ref()), state.is_authenticated()));
        match resolution {
            Resolution::Redirect(to) => {
                log::debug!("route {path} redirected to {to}");
                view! { <Redirect path=to/> }.into_any()
            }
            Resolution::Render { view: target, params } => {
                let page = render_view(target, &params);
                if signed_in {
                    view! {
                        <NavBar/>
                        <main class="page">{page}</main>
                    }
                    .into_any()
                } else {
                    view! { <main class="page page--public">{page}</main> }.into_any()
                }
            }
        }
    }
}

fn render_view(target: View, params: &RouteParams) -> AnyView {
    match target {
        View::Login => view! { <LoginPage/> }.into_any(),
        View::Register => view! { <RegisterPage/> }.into_any(),
        View::ForgotPassword => view! { <ForgotPasswordPage/> }.into_any(),
        View::Dashboard => view! { <DashboardPage/> }.into_any(),
        View::TextbookList => view! { <TextbookListPage/> }.into_any(),
        View::TextbookViewer => {
            let id = params.get("id").unwrap_or_default().to_owned();
            view! { <TextbookViewerPage id=id/> }.into_any()
        }
        View::Games => view! { <GamesPage/> }.into_any(),
        View::Profile => view! { <ProfilePage/> }.into_any(),
        View::AccessibilitySettings => view! { <AccessibilityPage/> }.into_any(),
        View::Admin => view! { <AdminPage/> }.into_any(),
    }
}
