//! Accessibility settings page.
//!
//! Edits go straight into the shared preference signal; `AppState` persists
//! and applies them, so every open view picks up the change immediately.
//! "Save to my account" additionally stores them on the profile so they
//! follow the user to other devices.

#[cfg(test)]
#[path = "accessibility_test.rs"]
mod accessibility_test;

use leptos::prelude::*;
use session::ProfileUpdate;
use session::prefs::{
    AccessibilityPrefs, FontFamily, MAX_LINE_SPACING, MAX_SPEECH_RATE, MIN_LINE_SPACING, MIN_SPEECH_RATE,
};

/// Parse a range input value; unparsable input leaves the preference alone.
fn parse_slider(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|value| value.is_finite())
}

fn with_line_spacing(prefs: AccessibilityPrefs, raw: &str) -> AccessibilityPrefs {
    parse_slider(raw).map_or(prefs, |line_spacing| AccessibilityPrefs { line_spacing, ..prefs }.sanitized())
}

fn with_speech_rate(prefs: AccessibilityPrefs, raw: &str) -> AccessibilityPrefs {
    parse_slider(raw).map_or(prefs, |speech_rate| AccessibilityPrefs { speech_rate, ..prefs }.sanitized())
}

fn account_update(prefs: AccessibilityPrefs) -> ProfileUpdate {
    ProfileUpdate { accessibility: Some(prefs.sanitized()), ..ProfileUpdate::default() }
}

#[component]
pub fn AccessibilityPage() -> impl IntoView {
    let prefs = expect_context::<RwSignal<AccessibilityPrefs>>();
    let auth = expect_context::<RwSignal<crate::state::auth::AuthState>>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_font = move |ev: leptos::ev::Event| {
        if let Some(font) = FontFamily::parse(&event_target_value(&ev)) {
            prefs.update(|p| p.font = font);
        }
    };
    let on_contrast = move |ev: leptos::ev::Event| {
        let checked = event_target_checked(&ev);
        prefs.update(|p| p.high_contrast = checked);
    };
    let on_spacing = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        prefs.update(|p| *p = with_line_spacing(*p, &raw));
    };
    let on_rate = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        prefs.update(|p| *p = with_speech_rate(*p, &raw));
    };
    let on_reset = move |_: leptos::ev::MouseEvent| prefs.set(AccessibilityPrefs::default());
    let on_save = move |_: leptos::ev::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let update = account_update(prefs.get_untracked());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let store = crate::util::storage::LocalTokenStore;
            let api = crate::net::api::HttpAuthApi::default();
            match session::update_profile(&store, &api, &update).await {
                Ok(user) => {
                    auth.update(|state| state.sign_in(user));
                    info.set("Saved to your account.".to_owned());
                }
                Err(e) => {
                    log::warn!("saving accessibility preferences failed: {e}");
                    info.set(e.user_message());
                }
            }
            busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = (auth, update);
            busy.set(false);
        }
    };

    view! {
        <section class="accessibility-page">
            <h1>"Reading and listening"</h1>

            <label for="a11y-font">"Font"</label>
            <select id="a11y-font" on:change=on_font>
                {FontFamily::ALL
                    .into_iter()
                    .map(|font| {
                        view! {
                            <option value=font.as_str() selected=move || prefs.with(|p| p.font == font)>
                                {font.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            <label class="accessibility-page__toggle">
                <input
                    type="checkbox"
                    prop:checked=move || prefs.with(|p| p.high_contrast)
                    on:change=on_contrast
                />
                "High contrast"
            </label>

            <label for="a11y-spacing">"Line spacing"</label>
            <input
                id="a11y-spacing"
                type="range"
                min=MIN_LINE_SPACING.to_string()
                max=MAX_LINE_SPACING.to_string()
                step="0.1"
                prop:value=move || prefs.with(|p| p.line_spacing.to_string())
                on:input=on_spacing
            />

            <label for="a11y-rate">"Speech rate"</label>
            <input
                id="a11y-rate"
                type="range"
                min=MIN_SPEECH_RATE.to_string()
                max=MAX_SPEECH_RATE.to_string()
                step="0.05"
                prop:value=move || prefs.with(|p| p.speech_rate.to_string())
                on:input=on_rate
            />

            <button class="accessibility-page__reset" on:click=on_reset>"Reset to defaults"</button>
            <button class="accessibility-page__save" on:click=on_save disabled=move || busy.get()>
                "Save to my account"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="accessibility-page__message" role="status">{move || info.get()}</p>
            </Show>
        </section>
    }
}
