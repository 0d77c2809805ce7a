use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// A conditional show/hide rule owned by a source question.
///
/// The condition is always evaluated against the response of the question
/// that declares the rule; `target_question_id` names the question whose
/// visibility is affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicRule {
    pub target_question_id: QuestionId,
    pub action: RuleAction,
    pub condition: RuleCondition,
    pub value: ConditionValue,
}

impl LogicRule {
    /// Create a rule.
    pub fn new(
        target: impl Into<QuestionId>,
        action: RuleAction,
        condition: RuleCondition,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            target_question_id: target.into(),
            action,
            condition,
            value: value.into(),
        }
    }

    /// Show `target` when the condition holds.
    pub fn show(
        target: impl Into<QuestionId>,
        condition: RuleCondition,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self::new(target, RuleAction::Show, condition, value)
    }

    /// Hide `target` when the condition holds.
    pub fn hide(
        target: impl Into<QuestionId>,
        condition: RuleCondition,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self::new(target, RuleAction::Hide, condition, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    Show,
    Hide,
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    /// Array membership; multi-select sources only.
    Contains,
    /// Negated array membership; multi-select sources only.
    NotContains,
}

impl RuleCondition {
    /// Check if this condition tests array membership.
    pub fn is_membership(&self) -> bool {
        matches!(self, Self::Contains | Self::NotContains)
    }

    /// Check if this condition compares numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }
}

/// The operand of a rule condition, as written in the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConditionValue {
    /// The operand as text, the form used for equality and membership tests.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    /// The operand as a number, if it is one or parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            Self::Bool(_) => None,
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ConditionValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for ConditionValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
