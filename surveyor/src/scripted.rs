//! Scripted respondent for running surveys without user interaction.
//!
//! `ScriptedRespondent` answers each question it is shown from a table of
//! canned responses, navigating a [`Session`] exactly as a person would:
//! only visible questions are answered, and every answer goes through the
//! session's validation.
//!
//! # Example
//!
//! ```rust
//! use surveyor::{Question, QuestionKind, Respondent, ScriptedRespondent, Session, SurveyDefinition};
//!
//! let definition = SurveyDefinition::new(
//!     "contact",
//!     "Contact",
//!     vec![
//!         Question::new("name", "Your name?", QuestionKind::OpenText(Default::default())).required(),
//!         Question::new("age", "Your age?", QuestionKind::Numeric(Default::default())),
//!     ],
//! );
//!
//! let snapshot = ScriptedRespondent::new()
//!     .with_text("name", "Ada")
//!     .with_number("age", 36.0)
//!     .complete(&mut Session::new(&definition))
//!     .unwrap();
//!
//! assert_eq!(snapshot.get("name").unwrap().display, "Ada");
//! ```

use std::collections::HashMap;

use surveyor_types::{QuestionId, ResponseValue, UploadedFile};

use crate::runtime::{Session, SessionError, Step};
use crate::snapshot::ResponseSnapshot;
use crate::validate::ValidationFailure;

/// Something that can drive a [`Session`] to submission.
///
/// Implementations decide how answers are obtained (prompts, forms,
/// canned values) and return the snapshot produced on submit.
pub trait Respondent {
    /// The error type for this respondent.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Answer the session's questions and submit it.
    fn complete(&self, session: &mut Session<'_>) -> Result<ResponseSnapshot, Self::Error>;
}

/// A respondent that returns pre-configured responses.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRespondent {
    responses: HashMap<QuestionId, ResponseValue>,
}

/// Error type for [`ScriptedRespondent`].
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("No scripted response for required question '{0}'")]
    MissingResponse(QuestionId),

    #[error("Scripted response for '{question}' was rejected: {failure}")]
    ValidationFailed {
        question: QuestionId,
        failure: ValidationFailure,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ScriptedRespondent {
    /// Create a respondent without any responses.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Add a response for a question.
    pub fn with_response(mut self, id: impl Into<QuestionId>, value: impl Into<ResponseValue>) -> Self {
        self.responses.insert(id.into(), value.into());
        self
    }

    /// Add a text response (option id, free text or ISO date).
    pub fn with_text(self, id: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        self.with_response(id, ResponseValue::Text(value.into()))
    }

    /// Add a numeric response.
    pub fn with_number(self, id: impl Into<QuestionId>, value: f64) -> Self {
        self.with_response(id, ResponseValue::Number(value))
    }

    /// Add a list response (checkbox selections or ranking order).
    pub fn with_list<S: Into<String>>(self, id: impl Into<QuestionId>, values: impl IntoIterator<Item = S>) -> Self {
        self.with_response(id, ResponseValue::List(values.into_iter().map(Into::into).collect()))
    }

    /// Add uploaded files.
    pub fn with_files(self, id: impl Into<QuestionId>, files: Vec<UploadedFile>) -> Self {
        self.with_response(id, ResponseValue::Files(files))
    }

    /// Add one matrix row answer, keeping earlier rows of the same question.
    pub fn with_matrix_cell(
        mut self,
        id: impl Into<QuestionId>,
        row: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        let entry = self
            .responses
            .entry(id.into())
            .or_insert_with(|| ResponseValue::Matrix(Default::default()));
        if !matches!(entry, ResponseValue::Matrix(_)) {
            *entry = ResponseValue::Matrix(Default::default());
        }
        if let ResponseValue::Matrix(cells) = entry {
            cells.insert(row.into(), column.into());
        }
        self
    }
}

impl Respondent for ScriptedRespondent {
    type Error = ScriptError;

    fn complete(&self, session: &mut Session<'_>) -> Result<ResponseSnapshot, ScriptError> {
        while let Some(question) = session.current_question() {
            if !question.is_section_break() {
                match self.responses.get(&question.id) {
                    Some(value) => {
                        let outcome = session.respond(question.id.as_str(), value.clone())?;
                        if let Err(failure) = outcome.validation {
                            return Err(ScriptError::ValidationFailed {
                                question: question.id.clone(),
                                failure,
                            });
                        }
                        if outcome.advanced {
                            continue;
                        }
                    }
                    None if question.required => {
                        return Err(ScriptError::MissingResponse(question.id.clone()));
                    }
                    None => {}
                }
            }

            match session.next()? {
                Step::Moved(_) => {}
                Step::Stayed => break,
            }
        }

        Ok(session.submit()?)
    }
}
