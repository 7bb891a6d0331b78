//! Accessibility and language preferences shared by every view.
//!
//! Both live in client-side storage under their own keys and fall back to
//! defaults when missing or unreadable. A copy may also be saved on the
//! account (see `User::accessibility_prefs`). They are independent: changing one
//! never touches the other.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use serde::{Deserialize, Serialize};

pub const ACCESSIBILITY_KEY: &str = "accessibilityPrefs";
pub const LANGUAGE_KEY: &str = "language";

pub const MIN_LINE_SPACING: f32 = 1.0;
pub const MAX_LINE_SPACING: f32 = 3.0;
pub const MIN_SPEECH_RATE: f32 = 0.5;
pub const MAX_SPEECH_RATE: f32 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Default,
    /// OpenDyslexic-style face with weighted letter bottoms.
    Dyslexic,
    Serif,
}

impl FontFamily {
    pub const ALL: [Self; 3] = [Self::Default, Self::Dyslexic, Self::Serif];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dyslexic => "dyslexic",
            Self::Serif => "serif",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|font| font.as_str() == raw)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "System default",
            Self::Dyslexic => "Dyslexia-friendly",
            Self::Serif => "Serif",
        }
    }
}

/// Reading and listening preferences.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityPrefs {
    pub font: FontFamily,
    pub high_contrast: bool,
    /// Line height multiplier.
    pub line_spacing: f32,
    /// Text-to-speech rate multiplier.
    pub speech_rate: f32,
}

impl Default for AccessibilityPrefs {
    fn default() -> Self {
        Self { font: FontFamily::Default, high_contrast: false, line_spacing: 1.5, speech_rate: 1.0 }
    }
}

impl AccessibilityPrefs {
    /// Clamp numeric fields into their supported ranges. Non-finite values
    /// reset to the default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            line_spacing: clamp_or(self.line_spacing, MIN_LINE_SPACING, MAX_LINE_SPACING, defaults.line_spacing),
            speech_rate: clamp_or(self.speech_rate, MIN_SPEECH_RATE, MAX_SPEECH_RATE, defaults.speech_rate),
            ..self
        }
    }

    /// Decode stored JSON; anything unreadable yields defaults.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|raw| serde_json::from_str::<Self>(raw).ok())
            .map(Self::sanitized)
            .unwrap_or_default()
    }

    /// JSON form written to storage.
    #[must_use]
    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// CSS classes to set on the document root.
    #[must_use]
    pub fn root_classes(&self) -> Vec<String> {
        let mut classes = vec![format!("font-{}", self.font.as_str())];
        if self.high_contrast {
            classes.push("high-contrast".to_owned());
        }
        classes
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { fallback }
}

/// Supported interface languages as `(code, endonym)`.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] =
    &[("en", "English"), ("es", "Español"), ("fr", "Français"), ("hi", "हिन्दी"), ("sw", "Kiswahili")];

/// Interface language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguagePref {
    code: &'static str,
}

impl Default for LanguagePref {
    fn default() -> Self {
        Self { code: SUPPORTED_LANGUAGES[0].0 }
    }
}

impl LanguagePref {
    /// Look up a supported language; unsupported codes yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(raw))
            .map(|(code, _)| Self { code })
    }

    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(code, _)| *code == self.code)
            .map_or(self.code, |(_, name)| name)
    }
}
