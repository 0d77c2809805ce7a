//! Core types for the surveyor crate.
//!
//! This crate provides the foundational types for defining surveys:
//! - `SurveyDefinition` and `SurveySettings` - The top-level survey structure
//! - `Question` and `QuestionKind` - Individual questions, one variant per question type
//! - `LogicRule` - Conditional show/hide rules owned by a source question
//! - `LocalizedText` - Plain or per-language text
//! - `Responses` and `ResponseValue` - Collected answers keyed by `QuestionId`

mod question_id;
pub use question_id::QuestionId;

mod localized_text;
pub use localized_text::{LocalizedText, Translations};

mod settings;
pub use settings::{NavigationStyle, QuestionNumbering, RequiredIndicator, SurveySettings, Theme};

mod logic;
pub use logic::{ConditionValue, LogicRule, RuleAction, RuleCondition};

mod question;
pub use question::{
    CheckboxProperties, CheckboxQuestion, ChoiceOption, ChoiceProperties, ChoiceQuestion,
    DateProperties, DateQuestion, FileUploadProperties, FileUploadQuestion, LikertProperties,
    LikertQuestion, MatrixQuestion, NumericProperties, NumericQuestion, OpenTextProperties,
    OpenTextQuestion, Question, QuestionKind, QuestionType, RankingProperties, RankingQuestion,
};

mod response_value;
pub use response_value::{ResponseValue, UploadedFile};

mod responses;
pub use responses::{ResponseError, Responses};

mod survey_definition;
pub use survey_definition::{DefinitionIssue, SurveyDefinition};

mod error;
pub use error::DefinitionError;
