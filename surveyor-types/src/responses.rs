use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{QuestionId, ResponseValue, UploadedFile};

/// Error type for response access operations.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Missing response for question: {0}")]
    MissingResponse(QuestionId),

    #[error("Type mismatch for question '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Response state of one survey session, keyed by question id.
///
/// Serializes as a plain JSON object, e.g. `{"q1": "A", "q2": ["x", "y"]}`.
/// Responses of questions that are currently hidden stay in here; visibility
/// governs presentation, not retention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    values: BTreeMap<QuestionId, ResponseValue>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert a response, returning the value it replaced.
    pub fn insert(
        &mut self,
        id: impl Into<QuestionId>,
        value: impl Into<ResponseValue>,
    ) -> Option<ResponseValue> {
        self.values.insert(id.into(), value.into())
    }

    /// Get the response for a question.
    pub fn get(&self, id: &str) -> Option<&ResponseValue> {
        self.values.get(id)
    }

    /// Check if a response exists for a question.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the response for a question.
    pub fn remove(&mut self, id: &str) -> Option<ResponseValue> {
        self.values.remove(id)
    }

    /// Get an iterator over all id-value pairs, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &ResponseValue)> {
        self.values.iter()
    }

    /// Get the number of responses.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no responses.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another responses collection into this one.
    pub fn extend(&mut self, other: Responses) {
        self.values.extend(other.values);
    }

    // === Convenience accessors ===

    /// Get a text value.
    pub fn get_text(&self, id: &str) -> Result<&str, ResponseError> {
        match self.get(id) {
            Some(ResponseValue::Text(s)) => Ok(s),
            Some(other) => Err(mismatch(id, "Text", other)),
            None => Err(ResponseError::MissingResponse(id.into())),
        }
    }

    /// Get a number. Text that parses as a number is accepted.
    pub fn get_number(&self, id: &str) -> Result<f64, ResponseError> {
        match self.get(id) {
            Some(value) => value
                .as_number()
                .ok_or_else(|| mismatch(id, "Number", value)),
            None => Err(ResponseError::MissingResponse(id.into())),
        }
    }

    /// Get a list of option ids.
    pub fn get_list(&self, id: &str) -> Result<&[String], ResponseError> {
        match self.get(id) {
            Some(ResponseValue::List(items)) => Ok(items),
            Some(other) => Err(mismatch(id, "List", other)),
            None => Err(ResponseError::MissingResponse(id.into())),
        }
    }

    /// Get uploaded files.
    pub fn get_files(&self, id: &str) -> Result<&[UploadedFile], ResponseError> {
        match self.get(id) {
            Some(value) => value.as_files().ok_or_else(|| mismatch(id, "Files", value)),
            None => Err(ResponseError::MissingResponse(id.into())),
        }
    }

    /// Get a matrix row → column map.
    pub fn get_matrix(&self, id: &str) -> Result<&BTreeMap<String, String>, ResponseError> {
        match self.get(id) {
            Some(ResponseValue::Matrix(cells)) => Ok(cells),
            Some(other) => Err(mismatch(id, "Matrix", other)),
            None => Err(ResponseError::MissingResponse(id.into())),
        }
    }

    /// Check if a question has a non-empty response.
    pub fn has_value(&self, id: &str) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }
}

fn mismatch(id: &str, expected: &'static str, actual: &ResponseValue) -> ResponseError {
    ResponseError::TypeMismatch {
        id: id.into(),
        expected,
        actual: actual.type_name(),
    }
}

impl IntoIterator for Responses {
    type Item = (QuestionId, ResponseValue);
    type IntoIter = std::collections::btree_map::IntoIter<QuestionId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a QuestionId, &'a ResponseValue);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Responses
where
    K: Into<QuestionId>,
    V: Into<ResponseValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut responses = Responses::new();
        for (id, value) in iter {
            responses.insert(id, value);
        }
        responses
    }
}
