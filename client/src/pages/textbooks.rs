//! Textbook list and viewer pages.
//!
//! ERROR HANDLING
//! ==============
//! The viewer renders a `Result`. An id the backend could never have issued
//! becomes a [`ViewerError`], which the root error boundary catches and shows
//! in place of the page.

#[cfg(test)]
#[path = "textbooks_test.rs"]
mod textbooks_test;

use leptos::prelude::*;

const MAX_TEXTBOOK_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    #[error("textbook id is missing")]
    MissingId,
    #[error("textbook id `{0}` is not valid")]
    InvalidId(String),
}

/// Accept ids made of ASCII letters, digits, `-` and `_`.
fn parse_textbook_id(raw: &str) -> Result<String, ViewerError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ViewerError::MissingId);
    }
    let well_formed = id.len() <= MAX_TEXTBOOK_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !well_formed {
        return Err(ViewerError::InvalidId(id.to_owned()));
    }
    Ok(id.to_owned())
}

#[component]
pub fn TextbookListPage() -> impl IntoView {
    view! {
        <section class="textbooks-page">
            <h1>"Textbooks"</h1>
            <p>"Uploaded textbooks and their audio, summary, and translated versions are listed here."</p>
        </section>
    }
}

/// Reader for a single textbook.
#[component]
pub fn TextbookViewerPage(id: String) -> impl IntoView {
    parse_textbook_id(&id).map(|id| {
        view! {
            <section class="viewer-page">
                <h1>"Textbook " {id}</h1>
                <p>"Reading view with text-to-speech and simplified summaries."</p>
                <a href="/textbooks">"All textbooks"</a>
            </section>
        }
    })
}
