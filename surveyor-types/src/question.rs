use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{LocalizedText, LogicRule, QuestionId};

/// A single question in a survey.
///
/// The JSON form is flat: common fields (`id`, `text`, `description`,
/// `required`, `logic`) sit next to the `type` tag and the type-specific
/// fields (`options`, `rows`, `columns`, `properties`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the survey.
    pub id: QuestionId,

    /// The prompt shown to the respondent.
    #[serde(default)]
    pub text: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default)]
    pub required: bool,

    /// The kind of question (determines input widget, validation and response shape).
    #[serde(flatten)]
    pub kind: QuestionKind,

    /// Rules evaluated against this question's response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logic: Vec<LogicRule>,
}

impl Question {
    /// Create a new, optional question without rules.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<LocalizedText>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: LocalizedText::default(),
            required: false,
            kind,
            logic: Vec::new(),
        }
    }

    /// Create a section break with a heading.
    pub fn section_break(id: impl Into<QuestionId>, heading: impl Into<LocalizedText>) -> Self {
        Self::new(id, heading, QuestionKind::SectionBreak)
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a logic rule.
    pub fn with_rule(mut self, rule: LogicRule) -> Self {
        self.logic.push(rule);
        self
    }

    /// Get the question type tag.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Check if this question is a section delimiter.
    pub fn is_section_break(&self) -> bool {
        matches!(self.kind, QuestionKind::SectionBreak)
    }
}

/// The kind of question, with its type-specific structure and properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option (radio buttons).
    MultipleChoice(ChoiceQuestion),

    /// Pick any number of options.
    CheckboxGroup(CheckboxQuestion),

    /// Rate on a 1..=scale scale.
    LikertScale(LikertQuestion),

    /// Free text.
    OpenText(OpenTextQuestion),

    /// Pick exactly one option from a drop-down list.
    Dropdown(ChoiceQuestion),

    /// One column choice per row.
    Matrix(MatrixQuestion),

    Numeric(NumericQuestion),

    Date(DateQuestion),

    /// Order all options by preference.
    Ranking(RankingQuestion),

    FileUpload(FileUploadQuestion),

    /// Starts a new section; collects no response.
    SectionBreak,
}

impl QuestionKind {
    /// Create a multiple choice question kind.
    pub fn multiple_choice(options: Vec<ChoiceOption>) -> Self {
        Self::MultipleChoice(ChoiceQuestion::new(options))
    }

    /// Create a dropdown question kind.
    pub fn dropdown(options: Vec<ChoiceOption>) -> Self {
        Self::Dropdown(ChoiceQuestion::new(options))
    }

    /// Create a checkbox group question kind.
    pub fn checkbox_group(options: Vec<ChoiceOption>) -> Self {
        Self::CheckboxGroup(CheckboxQuestion {
            options,
            ..Default::default()
        })
    }

    /// Create a ranking question kind.
    pub fn ranking(options: Vec<ChoiceOption>) -> Self {
        Self::Ranking(RankingQuestion {
            options,
            ..Default::default()
        })
    }

    /// Create a matrix question kind.
    pub fn matrix(rows: Vec<ChoiceOption>, columns: Vec<ChoiceOption>) -> Self {
        Self::Matrix(MatrixQuestion { rows, columns })
    }

    /// Get the type tag of this kind.
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::MultipleChoice(_) => QuestionType::MultipleChoice,
            Self::CheckboxGroup(_) => QuestionType::CheckboxGroup,
            Self::LikertScale(_) => QuestionType::LikertScale,
            Self::OpenText(_) => QuestionType::OpenText,
            Self::Dropdown(_) => QuestionType::Dropdown,
            Self::Matrix(_) => QuestionType::Matrix,
            Self::Numeric(_) => QuestionType::Numeric,
            Self::Date(_) => QuestionType::Date,
            Self::Ranking(_) => QuestionType::Ranking,
            Self::FileUpload(_) => QuestionType::FileUpload,
            Self::SectionBreak => QuestionType::SectionBreak,
        }
    }

    /// The selectable options of choice-like kinds; empty for everything else.
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            Self::MultipleChoice(q) | Self::Dropdown(q) => &q.options,
            Self::CheckboxGroup(q) => &q.options,
            Self::Ranking(q) => &q.options,
            _ => &[],
        }
    }

    /// Check if options should be shuffled each time the question is presented.
    pub fn randomizes_options(&self) -> bool {
        match self {
            Self::MultipleChoice(q) | Self::Dropdown(q) => q.properties.randomize,
            Self::CheckboxGroup(q) => q.properties.randomize,
            Self::Ranking(q) => q.properties.randomize,
            _ => false,
        }
    }
}

/// The `type` tag of a question, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    CheckboxGroup,
    LikertScale,
    OpenText,
    Dropdown,
    Matrix,
    Numeric,
    Date,
    Ranking,
    FileUpload,
    SectionBreak,
}

impl QuestionType {
    /// The tag as written in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::CheckboxGroup => "checkbox_group",
            Self::LikertScale => "likert_scale",
            Self::OpenText => "open_text",
            Self::Dropdown => "dropdown",
            Self::Matrix => "matrix",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Ranking => "ranking",
            Self::FileUpload => "file_upload",
            Self::SectionBreak => "section_break",
        }
    }

    /// Check if responses are a set of selections (`contains` rules apply).
    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::CheckboxGroup)
    }

    /// Check if responses are numbers (`greater_than`/`less_than` rules apply).
    pub fn is_numeric_like(&self) -> bool {
        matches!(self, Self::Numeric | Self::LikertScale)
    }

    /// Check if questions of this type offer `options`.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::Dropdown | Self::CheckboxGroup | Self::Ranking
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An option of a choice-like question, or a row/column of a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// The value stored in responses when this option is picked.
    pub id: String,

    #[serde(default)]
    pub text: LocalizedText,
}

impl ChoiceOption {
    /// Create a new option.
    pub fn new(id: impl Into<String>, text: impl Into<LocalizedText>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Configuration for multiple choice and dropdown questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceQuestion {
    pub options: Vec<ChoiceOption>,
    pub properties: ChoiceProperties,
}

impl ChoiceQuestion {
    /// Create a new choice question with the given options.
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            options,
            properties: ChoiceProperties::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceProperties {
    /// Shuffle options each time the question is presented.
    pub randomize: bool,

    /// Accept free text that is not one of the options.
    pub allow_other: bool,
}

/// Configuration for a checkbox group (multi-select).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxQuestion {
    pub options: Vec<ChoiceOption>,
    pub properties: CheckboxProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxProperties {
    pub randomize: bool,
    pub allow_other: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
}

/// Configuration for a likert scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikertQuestion {
    pub properties: LikertProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LikertProperties {
    /// Number of points; responses range over `1..=scale`.
    pub scale: u8,

    pub min_label: LocalizedText,
    pub max_label: LocalizedText,
}

impl Default for LikertProperties {
    fn default() -> Self {
        Self {
            scale: 5,
            min_label: LocalizedText::default(),
            max_label: LocalizedText::default(),
        }
    }
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenTextQuestion {
    pub properties: OpenTextProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenTextProperties {
    /// Render a textarea instead of a single-line input.
    pub multiline: bool,

    /// Maximum number of characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    pub placeholder: LocalizedText,
}

/// Configuration for a matrix (grid) question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixQuestion {
    pub rows: Vec<ChoiceOption>,
    pub columns: Vec<ChoiceOption>,
}

/// Configuration for a numeric input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericQuestion {
    pub properties: NumericProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Configuration for a date input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateQuestion {
    pub properties: DateProperties,
}

/// Date bounds, written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<NaiveDate>,
}

/// Configuration for a ranking question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingQuestion {
    pub options: Vec<ChoiceOption>,
    pub properties: RankingProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingProperties {
    /// Shuffle the initial order each time the question is presented.
    pub randomize: bool,
}

/// Configuration for a file upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUploadQuestion {
    pub properties: FileUploadProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileUploadProperties {
    /// Accepted extensions (`.pdf`), MIME types (`image/png`) or wildcards (`image/*`).
    /// Empty accepts everything.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,

    /// Per-file limit in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
}
