//! Per-question validation.
//!
//! A question is checked in two steps: whether it *has a response* (only
//! enforced when it is `required`), and whether a present response fits the
//! question's constraints (always enforced, even for optional questions).

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use surveyor_types::{
    CheckboxQuestion, ChoiceQuestion, DateQuestion, FileUploadQuestion, LikertQuestion,
    MatrixQuestion, NumericQuestion, OpenTextQuestion, Question, QuestionId, QuestionKind,
    RankingQuestion, ResponseValue, Responses, UploadedFile,
};

use crate::VisibilityMap;

/// Why a response does not satisfy its question.
///
/// The `Display` text is meant to be shown next to the question.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("This question requires an answer")]
    Required,

    #[error("Please answer every row (missing: {})", .missing.join(", "))]
    IncompleteMatrix { missing: Vec<String> },

    #[error("Expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("At most {max} files can be uploaded, got {actual}")]
    TooManyFiles { max: usize, actual: usize },

    #[error("File '{name}' is {size} bytes, above the limit of {max} bytes")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("File '{name}' is not an accepted file type")]
    FileTypeNotAllowed { name: String },

    #[error("'{value}' is not a number")]
    NotANumber { value: String },

    #[error("{value} is below the minimum of {min}")]
    BelowMinimum { value: f64, min: f64 },

    #[error("{value} is above the maximum of {max}")]
    AboveMaximum { value: f64, max: f64 },

    #[error("'{value}' is not a date (expected YYYY-MM-DD)")]
    NotADate { value: String },

    #[error("{date} is before the earliest allowed date {min}")]
    DateBeforeMinimum { date: NaiveDate, min: NaiveDate },

    #[error("{date} is after the latest allowed date {max}")]
    DateAfterMaximum { date: NaiveDate, max: NaiveDate },

    #[error("At most {max} characters allowed, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Select at least {min} options, got {actual}")]
    TooFewSelections { min: usize, actual: usize },

    #[error("Select at most {max} options, got {actual}")]
    TooManySelections { max: usize, actual: usize },

    #[error("'{value}' is not one of the options")]
    UnknownOption { value: String },

    #[error("'{value}' is ranked more than once")]
    DuplicateRanking { value: String },

    #[error("Rating must be a whole number from 1 to {scale}")]
    OutOfScale { scale: u8 },

    #[error("Row '{row}' / column '{column}' is not part of this matrix")]
    UnknownMatrixCell { row: String, column: String },
}

impl ValidationFailure {
    /// Check if this failure means "no (complete) answer" rather than a bad answer.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required | Self::IncompleteMatrix { .. })
    }

    /// Check if this failure is a constraint violation on a present answer.
    pub fn is_constraint(&self) -> bool {
        !self.is_required()
    }
}

/// Validate a question against the current responses.
pub fn validate(question: &Question, responses: &Responses) -> Result<(), ValidationFailure> {
    validate_response(question, responses.get(question.id.as_str()))
}

/// Check if a question's current response is valid.
pub fn is_valid(question: &Question, responses: &Responses) -> bool {
    validate(question, responses).is_ok()
}

/// Validate a single (possibly missing) response against its question.
pub fn validate_response(
    question: &Question,
    response: Option<&ResponseValue>,
) -> Result<(), ValidationFailure> {
    let required = question.required;
    let Some(value) = response else {
        return match question.kind {
            QuestionKind::SectionBreak => Ok(()),
            _ => require(required),
        };
    };

    match &question.kind {
        QuestionKind::SectionBreak => Ok(()),
        QuestionKind::MultipleChoice(choice) | QuestionKind::Dropdown(choice) => {
            check_choice(choice, value, required)
        }
        QuestionKind::CheckboxGroup(checkbox) => check_checkbox(checkbox, value, required),
        QuestionKind::LikertScale(likert) => check_likert(likert, value, required),
        QuestionKind::OpenText(open) => check_open_text(open, value, required),
        QuestionKind::Matrix(matrix) => check_matrix(matrix, value, required),
        QuestionKind::Numeric(numeric) => check_numeric(numeric, value, required),
        QuestionKind::Date(date) => check_date(date, value, required),
        QuestionKind::Ranking(ranking) => check_ranking(ranking, value, required),
        QuestionKind::FileUpload(upload) => check_files(upload, value, required),
    }
}

/// Validate every visible question, returning the failures by question id.
///
/// Questions missing from `visibility` count as visible.
pub fn validate_all<'a>(
    questions: impl IntoIterator<Item = &'a Question>,
    responses: &Responses,
    visibility: &VisibilityMap,
) -> BTreeMap<QuestionId, ValidationFailure> {
    questions
        .into_iter()
        .filter(|q| visibility.get(&q.id).copied().unwrap_or(true))
        .filter_map(|q| validate(q, responses).err().map(|f| (q.id.clone(), f)))
        .collect()
}

fn require(required: bool) -> Result<(), ValidationFailure> {
    if required {
        Err(ValidationFailure::Required)
    } else {
        Ok(())
    }
}

fn mismatch(expected: &'static str, value: &ResponseValue) -> ValidationFailure {
    ValidationFailure::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

fn scalar(value: &ResponseValue) -> Result<Cow<'_, str>, ValidationFailure> {
    value.scalar_text().ok_or_else(|| mismatch("Text", value))
}

fn list(value: &ResponseValue) -> Result<&[String], ValidationFailure> {
    value.as_list().ok_or_else(|| mismatch("List", value))
}

fn check_choice(
    choice: &ChoiceQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let picked = scalar(value)?;
    if picked.trim().is_empty() {
        return require(required);
    }
    if !choice.properties.allow_other && !choice.options.iter().any(|o| o.id == picked) {
        return Err(ValidationFailure::UnknownOption {
            value: picked.into_owned(),
        });
    }
    Ok(())
}

fn check_checkbox(
    checkbox: &CheckboxQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let selected = list(value)?;
    if selected.is_empty() {
        return require(required);
    }

    let properties = &checkbox.properties;
    if let Some(min) = properties.min_selections
        && selected.len() < min
    {
        return Err(ValidationFailure::TooFewSelections {
            min,
            actual: selected.len(),
        });
    }
    if let Some(max) = properties.max_selections
        && selected.len() > max
    {
        return Err(ValidationFailure::TooManySelections {
            max,
            actual: selected.len(),
        });
    }
    if !properties.allow_other
        && let Some(unknown) = selected
            .iter()
            .find(|s| !checkbox.options.iter().any(|o| &o.id == *s))
    {
        return Err(ValidationFailure::UnknownOption {
            value: unknown.clone(),
        });
    }
    Ok(())
}

fn check_likert(
    likert: &LikertQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    if value.is_empty() {
        return require(required);
    }
    let scale = likert.properties.scale;
    let rating = value.as_number().ok_or_else(|| mismatch("Number", value))?;
    if rating.fract() != 0.0 || rating < 1.0 || rating > f64::from(scale) {
        return Err(ValidationFailure::OutOfScale { scale });
    }
    Ok(())
}

fn check_open_text(
    open: &OpenTextQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let text = scalar(value)?;
    if text.trim().is_empty() {
        return require(required);
    }
    let length = text.chars().count();
    match open.properties.max_length {
        Some(max) if length > max => Err(ValidationFailure::TooLong {
            max,
            actual: length,
        }),
        _ => Ok(()),
    }
}

fn check_numeric(
    numeric: &NumericQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let text = scalar(value)?;
    if text.trim().is_empty() {
        return require(required);
    }
    let number = value
        .as_number()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationFailure::NotANumber {
            value: text.into_owned(),
        })?;

    let properties = &numeric.properties;
    if let Some(min) = properties.min
        && number < min
    {
        return Err(ValidationFailure::BelowMinimum { value: number, min });
    }
    if let Some(max) = properties.max
        && number > max
    {
        return Err(ValidationFailure::AboveMaximum { value: number, max });
    }
    Ok(())
}

fn check_date(
    date_question: &DateQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let text = value.as_text().ok_or_else(|| mismatch("Text", value))?;
    if text.trim().is_empty() {
        return require(required);
    }
    let date = parse_date(text.trim()).ok_or_else(|| ValidationFailure::NotADate {
        value: text.to_string(),
    })?;

    let properties = &date_question.properties;
    if let Some(min) = properties.min
        && date < min
    {
        return Err(ValidationFailure::DateBeforeMinimum { date, min });
    }
    if let Some(max) = properties.max
        && date > max
    {
        return Err(ValidationFailure::DateAfterMaximum { date, max });
    }
    Ok(())
}

fn check_ranking(
    ranking: &RankingQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let ranked = list(value)?;
    if ranked.is_empty() {
        return require(required);
    }

    let mut seen = HashSet::new();
    for entry in ranked {
        if !ranking.options.iter().any(|o| &o.id == entry) {
            return Err(ValidationFailure::UnknownOption {
                value: entry.clone(),
            });
        }
        if !seen.insert(entry) {
            return Err(ValidationFailure::DuplicateRanking {
                value: entry.clone(),
            });
        }
    }
    Ok(())
}

fn check_files(
    upload: &FileUploadQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let files = value.as_files().ok_or_else(|| mismatch("Files", value))?;
    if files.is_empty() {
        return require(required);
    }

    let properties = &upload.properties;
    if let Some(max) = properties.max_files
        && files.len() > max
    {
        return Err(ValidationFailure::TooManyFiles {
            max,
            actual: files.len(),
        });
    }
    for file in files {
        if let Some(max) = properties.max_file_size
            && file.size > max
        {
            return Err(ValidationFailure::FileTooLarge {
                name: file.name.clone(),
                size: file.size,
                max,
            });
        }
        if !properties.allowed_types.is_empty()
            && !properties
                .allowed_types
                .iter()
                .any(|accepted| file_matches(file, accepted))
        {
            return Err(ValidationFailure::FileTypeNotAllowed {
                name: file.name.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a zero-padded `YYYY-MM-DD` date. Unpadded and signed years are rejected.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Match a file against an `accept`-style entry: `.ext`, `type/subtype` or `type/*`.
fn file_matches(file: &UploadedFile, accepted: &str) -> bool {
    let accepted = accepted.trim().to_ascii_lowercase();
    if accepted.starts_with('.') {
        return file.name.to_ascii_lowercase().ends_with(&accepted);
    }
    let Some(mime) = file.mime_type.as_deref().map(str::to_ascii_lowercase) else {
        return false;
    };
    match accepted.strip_suffix("/*") {
        Some(family) => mime.split('/').next() == Some(family),
        None => mime == accepted,
    }
}

fn check_matrix(
    matrix: &MatrixQuestion,
    value: &ResponseValue,
    required: bool,
) -> Result<(), ValidationFailure> {
    let cells = value.as_matrix().ok_or_else(|| mismatch("Matrix", value))?;

    for (row, column) in cells {
        if column.is_empty() {
            continue;
        }
        let row_known = matrix.rows.iter().any(|r| &r.id == row);
        let column_known = matrix.columns.iter().any(|c| &c.id == column);
        if !row_known || !column_known {
            return Err(ValidationFailure::UnknownMatrixCell {
                row: row.clone(),
                column: column.clone(),
            });
        }
    }

    if !required {
        return Ok(());
    }
    let missing: Vec<String> = matrix
        .rows
        .iter()
        .filter(|r| cells.get(&r.id).is_none_or(|c| c.is_empty()))
        .map(|r| r.id.clone())
        .collect();
    match missing.len() {
        0 => Ok(()),
        n if n == matrix.rows.len() => Err(ValidationFailure::Required),
        _ => Err(ValidationFailure::IncompleteMatrix { missing }),
    }
}
