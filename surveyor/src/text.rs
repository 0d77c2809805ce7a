//! Resolution of localizable text to a single display string.

use surveyor_types::{LocalizedText, SurveySettings};

/// Resolve a localizable text for display.
///
/// Resolution order:
/// 1. plain text is returned verbatim;
/// 2. the entry for `active` if it is non-empty;
/// 3. the entry for `default` if it is non-empty;
/// 4. the first non-empty entry in declared order;
/// 5. the empty string.
///
/// Never fails, and only depends on its inputs.
pub fn resolve<'a>(field: &'a LocalizedText, active: &str, default: &str) -> &'a str {
    let translations = match field {
        LocalizedText::Plain(text) => return text,
        LocalizedText::Localized(translations) => translations,
    };

    [active, default]
        .into_iter()
        .filter_map(|language| translations.get(language))
        .chain(translations.values())
        .find(|text| !text.is_empty())
        .map_or("", String::as_str)
}

/// The active and default language of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    active: String,
    default: String,
}

impl Locale {
    /// Create a locale.
    pub fn new(active: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            default: default.into(),
        }
    }

    /// The locale a survey starts in: its default language.
    pub fn from_settings(settings: &SurveySettings) -> Self {
        Self::new(&settings.default_language, &settings.default_language)
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    /// Switch the active language.
    pub fn set_active(&mut self, language: impl Into<String>) {
        self.active = language.into();
    }

    /// Resolve a text in this locale.
    pub fn resolve<'a>(&self, field: &'a LocalizedText) -> &'a str {
        resolve(field, &self.active, &self.default)
    }
}
