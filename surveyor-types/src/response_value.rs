use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single response value collected for one question.
///
/// The shape depends on the question type: scalars for single-value
/// questions, lists for checkbox groups and rankings, file metadata for
/// uploads, and a row → column map for matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// A number (numeric, likert scale).
    Number(f64),

    /// A string (choice option id, free text, ISO date).
    Text(String),

    /// Selected option ids (checkbox group) or option ids in rank order (ranking).
    List(Vec<String>),

    /// Files retained by a file upload question.
    Files(Vec<UploadedFile>),

    /// Column id picked for each row id (matrix).
    Matrix(BTreeMap<String, String>),
}

/// Metadata of one uploaded file. File contents never enter the response state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,
}

impl UploadedFile {
    /// Create file metadata without a MIME type.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

impl ResponseValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number. Text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            _ => None,
        }
    }

    /// Try to get this value as a list of option ids.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as uploaded files.
    ///
    /// An empty list deserializes as `List`, so it is also accepted here.
    pub fn as_files(&self) -> Option<&[UploadedFile]> {
        match self {
            Self::Files(files) => Some(files),
            Self::List(items) if items.is_empty() => Some(&[]),
            _ => None,
        }
    }

    /// Try to get this value as a matrix row → column map.
    pub fn as_matrix(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Matrix(cells) => Some(cells),
            _ => None,
        }
    }

    /// The value as text, for scalar values only. Used for equality rules.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }

    /// Check if the value carries no data (empty text, list, file list or matrix).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Files(files) => files.is_empty(),
            Self::Matrix(cells) => cells.is_empty(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Text(_) => "Text",
            Self::List(_) => "List",
            Self::Files(_) => "Files",
            Self::Matrix(_) => "Matrix",
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for ResponseValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ResponseValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for ResponseValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for ResponseValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

impl From<Vec<UploadedFile>> for ResponseValue {
    fn from(files: Vec<UploadedFile>) -> Self {
        Self::Files(files)
    }
}

impl From<BTreeMap<String, String>> for ResponseValue {
    fn from(cells: BTreeMap<String, String>) -> Self {
        Self::Matrix(cells)
    }
}
