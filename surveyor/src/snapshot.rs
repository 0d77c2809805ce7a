//! The finalized summary of a submitted session.

use serde::{Deserialize, Serialize};
use surveyor_types::{Question, QuestionId, QuestionKind, QuestionType, ResponseValue, Responses};

use crate::VisibilityMap;
use crate::text::Locale;

/// One row per answered, visible question, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    pub survey_id: String,

    /// The language the session was in when it was submitted.
    pub language: String,

    pub entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub question_id: QuestionId,
    pub question_type: QuestionType,

    /// The question text, resolved in the session language.
    pub text: String,

    /// The raw response as stored.
    pub answer: ResponseValue,

    /// The response for humans: option ids replaced by option text.
    pub display: String,
}

impl ResponseSnapshot {
    /// Capture the snapshot of a session.
    ///
    /// `presented` is the presentation order; hidden, unanswered and
    /// section break questions are left out.
    pub fn capture<'a>(
        survey_id: impl Into<String>,
        presented: impl IntoIterator<Item = &'a Question>,
        responses: &Responses,
        visibility: &VisibilityMap,
        locale: &Locale,
    ) -> Self {
        let entries = presented
            .into_iter()
            .filter(|q| !q.is_section_break())
            .filter(|q| visibility.get(&q.id).copied().unwrap_or(true))
            .filter_map(|q| {
                let answer = responses.get(q.id.as_str()).filter(|v| !v.is_empty())?;
                Some(SnapshotEntry {
                    question_id: q.id.clone(),
                    question_type: q.question_type(),
                    text: locale.resolve(&q.text).to_string(),
                    answer: answer.clone(),
                    display: display_value(q, answer, locale),
                })
            })
            .collect();

        Self {
            survey_id: survey_id.into(),
            language: locale.active().to_string(),
            entries,
        }
    }

    /// Find the entry of a question.
    pub fn get(&self, id: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.question_id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a response for display, resolving option ids to option text.
///
/// Values that name no option (free "other" answers) are shown as given.
pub fn display_value(question: &Question, value: &ResponseValue, locale: &Locale) -> String {
    let option_text = |id: &str| -> String {
        question
            .kind
            .options()
            .iter()
            .find(|o| o.id == id)
            .map_or_else(|| id.to_string(), |o| locale.resolve(&o.text).to_string())
    };

    match (&question.kind, value) {
        (QuestionKind::Matrix(matrix), ResponseValue::Matrix(cells)) => matrix
            .rows
            .iter()
            .filter_map(|row| {
                let column_id = cells.get(&row.id).filter(|c| !c.is_empty())?;
                let column = matrix
                    .columns
                    .iter()
                    .find(|c| &c.id == column_id)
                    .map_or(column_id.as_str(), |c| locale.resolve(&c.text));
                Some(format!("{}: {}", locale.resolve(&row.text), column))
            })
            .collect::<Vec<_>>()
            .join("; "),
        (QuestionKind::Ranking(_), ResponseValue::List(items)) => items
            .iter()
            .enumerate()
            .map(|(rank, id)| format!("{}. {}", rank + 1, option_text(id.as_str())))
            .collect::<Vec<_>>()
            .join(", "),
        (QuestionKind::LikertScale(likert), value) => match value.scalar_text() {
            Some(rating) => format!("{rating} / {}", likert.properties.scale),
            None => String::new(),
        },
        (_, ResponseValue::List(items)) => items
            .iter()
            .map(|id| option_text(id.as_str()))
            .collect::<Vec<_>>()
            .join(", "),
        (_, ResponseValue::Files(files)) => files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        (_, ResponseValue::Text(text)) => option_text(text.as_str()),
        (_, ResponseValue::Number(n)) => n.to_string(),
        (_, ResponseValue::Matrix(cells)) => cells
            .iter()
            .map(|(row, column)| format!("{row}: {column}"))
            .collect::<Vec<_>>()
            .join("; "),
    }
}
