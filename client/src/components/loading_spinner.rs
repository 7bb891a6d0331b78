//! Full-page spinner shown while the stored session is being verified.

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <div class="loading-spinner__ring" aria-hidden="true"></div>
            <span class="loading-spinner__label">{label}</span>
        </div>
    }
}
