//! Fallback rendered by the root error boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any view that renders an `Err` lands here instead of taking the page
//! down. Errors are logged for diagnostics and listed for the user. The home
//! link is a plain anchor, so following it reloads the app from scratch.

use leptos::error::Errors;
use leptos::prelude::*;

/// Log and list every error currently held by the boundary.
#[component]
pub fn ErrorFallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let messages = move || {
        errors
            .get()
            .into_iter()
            .map(|(_, err)| {
                let message = err.to_string();
                log::error!("view failed to render: {message}");
                message
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="error-fallback" role="alert">
            <h2>"Something went wrong"</h2>
            <p>"This page could not be displayed."</p>
            <ul class="error-fallback__list">
                {move || messages().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
            </ul>
            <a href="/dashboard" class="error-fallback__home">"Back to dashboard"</a>
        </div>
    }
}
