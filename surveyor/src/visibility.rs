//! Conditional visibility of questions.
//!
//! Rules are owned by a *source* question and are evaluated against that
//! question's own response. Resolution runs in two phases:
//!
//! 1. every rule is evaluated and its result stored under
//!    `(source, target, action)`; a later rule with the same key replaces an
//!    earlier one;
//! 2. each question is hidden if any `hide` entry targeting it holds,
//!    otherwise shown if it has no `show` entries or at least one of them
//!    holds.
//!
//! The map is always recomputed from scratch; there is no incremental update.

use std::collections::BTreeMap;

use surveyor_types::{LogicRule, Question, QuestionId, ResponseValue, Responses, RuleAction, RuleCondition};

/// Visibility of every question, keyed by question id.
pub type VisibilityMap = BTreeMap<QuestionId, bool>;

/// The memo key of an evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleKey {
    pub source: QuestionId,
    pub target: QuestionId,
    pub action: RuleAction,
}

/// Evaluated rule results, one per `(source, target, action)`.
pub type RuleResults = BTreeMap<RuleKey, bool>;

/// Evaluate every rule of every question against the current responses.
pub fn evaluate_rules(questions: &[Question], responses: &Responses) -> RuleResults {
    let mut results = RuleResults::new();
    for source in questions {
        let response = responses.get(source.id.as_str());
        for rule in &source.logic {
            let holds = evaluate_condition(source, rule, response);
            tracing::trace!(
                source = %source.id,
                target = %rule.target_question_id,
                action = %rule.action,
                condition = ?rule.condition,
                holds,
                "Evaluated rule"
            );
            results.insert(
                RuleKey {
                    source: source.id.clone(),
                    target: rule.target_question_id.clone(),
                    action: rule.action,
                },
                holds,
            );
        }
    }
    results
}

/// Aggregate evaluated rules into a visibility map covering every question.
pub fn aggregate(questions: &[Question], results: &RuleResults) -> VisibilityMap {
    questions
        .iter()
        .map(|target| {
            let mut hidden = false;
            let mut has_show = false;
            let mut shown = false;
            for (key, &holds) in results.iter().filter(|(key, _)| key.target == target.id) {
                match key.action {
                    RuleAction::Hide => hidden |= holds,
                    RuleAction::Show => {
                        has_show = true;
                        shown |= holds;
                    }
                }
            }
            let visible = !hidden && (!has_show || shown);
            (target.id.clone(), visible)
        })
        .collect()
}

/// Resolve the visibility of every question from the current responses.
pub fn resolve_visibility(questions: &[Question], responses: &Responses) -> VisibilityMap {
    let map = aggregate(questions, &evaluate_rules(questions, responses));
    tracing::debug!(
        hidden = map.values().filter(|v| !**v).count(),
        total = map.len(),
        "Resolved visibility"
    );
    map
}

/// Evaluate one rule of `source` against the source's response.
///
/// Never fails: a rule that cannot apply (wrong source type, unparsable
/// number) evaluates to `false`.
pub fn evaluate_condition(source: &Question, rule: &LogicRule, response: Option<&ResponseValue>) -> bool {
    if source.question_type().is_multi_select() {
        let selected = response.and_then(ResponseValue::as_list).unwrap_or_default();
        let operand = rule.value.as_text();
        let member = selected.iter().any(|s| *s == operand);
        return match rule.condition {
            RuleCondition::Contains => member,
            RuleCondition::NotContains => !member,
            _ => false,
        };
    }

    match rule.condition {
        RuleCondition::Equals => scalar_equals(response, rule),
        RuleCondition::NotEquals => !scalar_equals(response, rule),
        RuleCondition::GreaterThan => compare(response, rule).is_some_and(|(a, b)| a > b),
        RuleCondition::LessThan => compare(response, rule).is_some_and(|(a, b)| a < b),
        RuleCondition::Contains | RuleCondition::NotContains => false,
    }
}

fn scalar_equals(response: Option<&ResponseValue>, rule: &LogicRule) -> bool {
    response
        .and_then(ResponseValue::scalar_text)
        .is_some_and(|text| text == rule.value.as_text())
}

fn compare(response: Option<&ResponseValue>, rule: &LogicRule) -> Option<(f64, f64)> {
    let left = response?.as_number()?;
    let right = rule.value.as_number()?;
    Some((left, right))
}
