use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question, unique within its survey.
///
/// Used as the key in `Responses`, in the visibility map, and as the
/// `targetQuestionId` of logic rules.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a new question id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for QuestionId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl PartialEq<str> for QuestionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QuestionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
