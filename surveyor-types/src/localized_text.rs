use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Translations of one text field, keyed by language code.
///
/// Keeps the order in which languages were declared; the resolver falls
/// back to that order when neither the active nor the default language
/// has a usable entry.
pub type Translations = IndexMap<String, String>;

/// A text field that is either a single string or one string per language.
///
/// In JSON this is either `"Hello"` or `{"en": "Hello", "de": "Hallo"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// The same text in every language.
    Plain(String),

    /// Per-language text.
    Localized(Translations),
}

impl LocalizedText {
    /// Create a plain, language-independent text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Create a localized text from `(language, text)` pairs, in declared order.
    pub fn localized<L, T>(entries: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self::Localized(
            entries
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        )
    }

    /// Add or replace a translation, turning a plain text into a localized one.
    ///
    /// A non-empty plain text is kept under `fallback_language`.
    pub fn with_translation(
        self,
        fallback_language: &str,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let mut translations = match self {
            Self::Plain(existing) if existing.is_empty() => Translations::new(),
            Self::Plain(existing) => {
                let mut map = Translations::new();
                map.insert(fallback_language.to_string(), existing);
                map
            }
            Self::Localized(map) => map,
        };
        translations.insert(language.into(), text.into());
        Self::Localized(translations)
    }

    /// The text for exactly this language, if present. Plain text matches any language.
    pub fn get(&self, language: &str) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Localized(map) => map.get(language).map(String::as_str),
        }
    }

    /// Languages this text declares, in stored order. Empty for plain text.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        let keys = match self {
            Self::Plain(_) => None,
            Self::Localized(map) => Some(map.keys().map(String::as_str)),
        };
        keys.into_iter().flatten()
    }

    /// Check if there is no non-empty text in any language.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Localized(map) => map.values().all(String::is_empty),
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::plain(s)
    }
}

impl From<String> for LocalizedText {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_from_json_string() {
        let text: LocalizedText = serde_json::from_str("\"Hello\"").unwrap();
        assert_eq!(text, LocalizedText::plain("Hello"));
    }

    #[test]
    fn localized_keeps_declared_order() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"fr": "Bonjour", "de": "Hallo", "en": "Hello"}"#).unwrap();
        let languages: Vec<_> = text.languages().collect();
        assert_eq!(languages, vec!["fr", "de", "en"]);
    }

    #[test]
    fn serializes_back_to_same_shape() {
        let text = LocalizedText::localized([("en", "Yes"), ("es", "Sí")]);
        assert_eq!(
            serde_json::to_string(&text).unwrap(),
            r#"{"en":"Yes","es":"Sí"}"#
        );
        assert_eq!(
            serde_json::to_string(&LocalizedText::plain("x")).unwrap(),
            "\"x\""
        );
    }

    #[test]
    fn with_translation_promotes_plain_text() {
        let text = LocalizedText::plain("Hello").with_translation("en", "de", "Hallo");
        assert_eq!(text.get("en"), Some("Hello"));
        assert_eq!(text.get("de"), Some("Hallo"));
    }

    #[test]
    fn emptiness() {
        assert!(LocalizedText::default().is_empty());
        assert!(LocalizedText::localized([("en", "")]).is_empty());
        assert!(!LocalizedText::localized([("en", ""), ("de", "Ja")]).is_empty());
    }
}
