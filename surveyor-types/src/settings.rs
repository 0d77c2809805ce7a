use serde::{Deserialize, Serialize};

use crate::LocalizedText;

/// Survey-wide behaviour and presentation settings.
///
/// Every field has a default, so a definition may omit `settings` entirely
/// or specify only the fields it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveySettings {
    /// Language used when the active language has no text.
    pub default_language: String,

    /// Languages the respondent may switch between.
    pub languages: Vec<String>,

    /// Colors and font of the exported document.
    #[serde(flatten)]
    pub theme: Theme,

    /// Shuffle question order once per session.
    pub randomize_questions: bool,

    /// When shuffling, keep questions inside their section.
    pub respect_sections: bool,

    pub show_progress_bar: bool,

    /// Show the response summary after submission.
    pub show_response_summary: bool,

    pub navigation_style: NavigationStyle,

    pub question_numbering: QuestionNumbering,

    pub required_indicator: RequiredIndicator,

    /// Message shown once the survey is submitted.
    pub completion_message: LocalizedText,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            languages: vec!["en".to_string()],
            theme: Theme::default(),
            randomize_questions: false,
            respect_sections: false,
            show_progress_bar: true,
            show_response_summary: false,
            navigation_style: NavigationStyle::default(),
            question_numbering: QuestionNumbering::default(),
            required_indicator: RequiredIndicator::default(),
            completion_message: LocalizedText::plain("Thank you for your response!"),
        }
    }
}

impl SurveySettings {
    /// Check whether respondents may switch to `language`.
    pub fn supports_language(&self, language: &str) -> bool {
        language == self.default_language || self.languages.iter().any(|l| l == language)
    }
}

/// Colors and font used by the generated style sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
            font_family: "Inter, system-ui, sans-serif".to_string(),
        }
    }
}

/// How the respondent moves between questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationStyle {
    /// Explicit next/previous buttons.
    #[default]
    Manual,

    /// Move on as soon as the current question holds a valid answer.
    AutoAdvance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionNumbering {
    #[default]
    Visible,
    Hidden,
}

/// How required questions are marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredIndicator {
    /// A trailing `*`.
    #[default]
    Asterisk,

    /// A trailing "(required)".
    Text,

    None,
}
