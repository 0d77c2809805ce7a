use crate::QuestionId;

/// Error type for loading a survey definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The input is not a well-formed survey definition.
    #[error("Invalid survey definition: {0}")]
    Json(#[from] serde_json::Error),

    /// Two questions share an id; responses could not be told apart.
    #[error("Duplicate question id: {0}")]
    DuplicateQuestionId(QuestionId),
}

impl DefinitionError {
    /// Check if this error comes from malformed JSON rather than a structural problem.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}
