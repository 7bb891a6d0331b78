//! Apply accessibility and language preferences to the `<html>` element.
//!
//! Font and contrast become classes (`font-*`, `high-contrast`), spacing
//! becomes the `--line-spacing` custom property, and the language code is set
//! as `lang`. Requires a browser environment.

use session::prefs::{AccessibilityPrefs, LanguagePref};

#[cfg(feature = "csr")]
const CONTRAST_CLASS: &str = "high-contrast";

#[cfg(feature = "csr")]
fn document_element() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.document_element()
}

/// Replace root font/contrast classes and line spacing with `prefs`.
pub fn apply_accessibility(prefs: &AccessibilityPrefs) {
    #[cfg(feature = "csr")]
    {
        use session::prefs::FontFamily;
        use wasm_bindgen::JsCast;

        let Some(el) = document_element() else {
            return;
        };
        let class_list = el.class_list();
        for font in FontFamily::ALL {
            let _ = class_list.remove_1(&format!("font-{}", font.as_str()));
        }
        let _ = class_list.remove_1(CONTRAST_CLASS);
        for class in prefs.root_classes() {
            let _ = class_list.add_1(&class);
        }
        if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property("--line-spacing", &prefs.line_spacing.to_string());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = prefs;
    }
}

/// Set the document `lang` attribute.
pub fn apply_language(language: &LanguagePref) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = document_element() {
            let _ = el.set_attribute("lang", language.code());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = language;
    }
}
