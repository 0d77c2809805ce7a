use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    DefinitionError, LocalizedText, Question, QuestionId, QuestionKind, QuestionType,
    RuleCondition, SurveySettings,
};

/// The top-level structure containing all questions, settings and metadata for a survey.
///
/// A definition is declarative and presentation-agnostic. It is produced by
/// an editor, consumed read-only by the runtime, and embedded verbatim into
/// exported documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub id: String,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default)]
    pub settings: SurveySettings,

    /// All questions, in authored order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given questions and default settings.
    pub fn new(id: impl Into<String>, title: impl Into<LocalizedText>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: LocalizedText::default(),
            settings: SurveySettings::default(),
            questions,
        }
    }

    /// Parse a definition from JSON and reject duplicate question ids.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.check_unique_ids()?;
        Ok(definition)
    }

    /// Serialize the definition to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: SurveySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions, section breaks included.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    fn check_unique_ids(&self) -> Result<(), DefinitionError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(DefinitionError::DuplicateQuestionId(question.id.clone()));
            }
        }
        Ok(())
    }

    /// Report authoring problems that do not prevent running the survey.
    ///
    /// Rules flagged here still evaluate at run time; they simply never
    /// evaluate true, or point at nothing.
    pub fn lint(&self) -> Vec<DefinitionIssue> {
        let mut issues = Vec::new();
        let mut ids: HashSet<&str> = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id.as_str()) {
                issues.push(DefinitionIssue::DuplicateQuestionId(question.id.clone()));
            }
        }

        if !self
            .settings
            .languages
            .iter()
            .any(|l| *l == self.settings.default_language)
        {
            issues.push(DefinitionIssue::DefaultLanguageNotEnabled(
                self.settings.default_language.clone(),
            ));
        }

        for question in &self.questions {
            let source_type = question.question_type();

            match &question.kind {
                QuestionKind::Matrix(matrix) if matrix.rows.is_empty() || matrix.columns.is_empty() => {
                    issues.push(DefinitionIssue::EmptyMatrix(question.id.clone()));
                }
                kind if source_type.has_options() && kind.options().is_empty() => {
                    issues.push(DefinitionIssue::NoOptions(question.id.clone()));
                }
                _ => {}
            }

            for rule in &question.logic {
                let target = &rule.target_question_id;
                if !ids.contains(target.as_str()) {
                    issues.push(DefinitionIssue::UnknownTarget {
                        source: question.id.clone(),
                        target: target.clone(),
                    });
                } else if *target == question.id {
                    issues.push(DefinitionIssue::SelfTarget(question.id.clone()));
                }

                if rule.condition.is_membership() != source_type.is_multi_select() {
                    issues.push(DefinitionIssue::ConditionNotApplicable {
                        source: question.id.clone(),
                        source_type,
                        condition: rule.condition,
                    });
                } else if rule.condition.is_numeric() && !source_type.is_numeric_like() {
                    issues.push(DefinitionIssue::NumericComparisonOnText {
                        source: question.id.clone(),
                        source_type,
                    });
                }
            }
        }

        issues
    }
}

/// An authoring problem found by [`SurveyDefinition::lint`].
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionIssue {
    /// A rule points at a question id that does not exist.
    UnknownTarget { source: QuestionId, target: QuestionId },

    /// A rule shows or hides the question that declares it.
    SelfTarget(QuestionId),

    /// The condition can never evaluate true for this source type
    /// (membership on a single-value source, or equality on a multi-select).
    ConditionNotApplicable {
        source: QuestionId,
        source_type: QuestionType,
        condition: RuleCondition,
    },

    /// `greater_than`/`less_than` on a source whose answers are not numbers.
    NumericComparisonOnText {
        source: QuestionId,
        source_type: QuestionType,
    },

    /// Two or more questions share an id; their responses would collide.
    DuplicateQuestionId(QuestionId),

    /// A choice-like question has no options.
    NoOptions(QuestionId),

    /// A matrix has no rows or no columns.
    EmptyMatrix(QuestionId),

    /// `defaultLanguage` is not among `languages`.
    DefaultLanguageNotEnabled(String),
}

impl fmt::Display for DefinitionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTarget { source, target } => {
                write!(f, "question '{source}' has a rule targeting unknown question '{target}'")
            }
            Self::SelfTarget(id) => write!(f, "question '{id}' has a rule targeting itself"),
            Self::ConditionNotApplicable {
                source,
                source_type,
                condition,
            } => write!(
                f,
                "question '{source}' ({source_type}) uses condition {condition:?}, which never matches for this type"
            ),
            Self::NumericComparisonOnText {
                source,
                source_type,
            } => write!(
                f,
                "question '{source}' ({source_type}) compares numerically, but its answers are not numbers"
            ),
            Self::DuplicateQuestionId(id) => write!(f, "question id '{id}' is used more than once"),
            Self::NoOptions(id) => write!(f, "question '{id}' has no options"),
            Self::EmptyMatrix(id) => write!(f, "matrix question '{id}' needs rows and columns"),
            Self::DefaultLanguageNotEnabled(lang) => {
                write!(f, "default language '{lang}' is not in the enabled languages")
            }
        }
    }
}
