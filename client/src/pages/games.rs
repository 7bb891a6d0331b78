//! Learning games page.

use leptos::prelude::*;

#[component]
pub fn GamesPage() -> impl IntoView {
    view! {
        <section class="games-page">
            <h1>"Learning games"</h1>
            <p>"Quizzes and word games built from your textbooks will appear here."</p>
        </section>
    }
}
