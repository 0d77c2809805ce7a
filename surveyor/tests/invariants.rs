//! Property tests for shuffling, visibility resolution and text fallback.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use surveyor::randomize::{sections, shuffle_within_sections};
use surveyor::text::resolve;
use surveyor::{
    ChoiceOption, LocalizedText, LogicRule, Question, QuestionKind, Responses, RuleCondition,
    resolve_visibility,
};

/// `true` marks a section break.
fn layout() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(prop::bool::weighted(0.25), 0..40)
}

fn chain(len: usize) -> Vec<Question> {
    (0..len)
        .map(|i| {
            let question = Question::new(
                format!("q{i}"),
                format!("Question {i}"),
                QuestionKind::multiple_choice(vec![ChoiceOption::new("A", "A"), ChoiceOption::new("B", "B")]),
            );
            let next = format!("q{}", i + 1);
            match i % 3 {
                0 => question.with_rule(LogicRule::show(next, RuleCondition::Equals, "A")),
                1 => question.with_rule(LogicRule::hide(next, RuleCondition::Equals, "B")),
                _ => question,
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Shuffling within sections keeps every element in its own section and
    /// keeps the number and relative order of sections.
    #[test]
    fn section_shuffle_preserves_sections(breaks in layout(), seed in any::<u64>()) {
        let items: Vec<(usize, bool)> = breaks.iter().copied().enumerate().collect();
        let before = sections(&items, |&(_, is_break)| is_break);

        let mut shuffled = items.clone();
        shuffle_within_sections(&mut shuffled, |&(_, is_break)| is_break, &mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(shuffled.len(), items.len());
        prop_assert_eq!(
            shuffled.iter().filter(|(_, b)| *b).count(),
            items.iter().filter(|(_, b)| *b).count()
        );
        for range in before {
            let mut original: Vec<usize> = items[range.clone()].iter().map(|(i, _)| *i).collect();
            let mut moved: Vec<usize> = shuffled[range].iter().map(|(i, _)| *i).collect();
            original.sort_unstable();
            moved.sort_unstable();
            prop_assert_eq!(original, moved);
        }
    }

    /// Resolution is a pure function of definition and responses.
    #[test]
    fn visibility_is_deterministic(len in 1usize..20, answers in prop::collection::vec(prop::option::of(prop::bool::ANY), 20)) {
        let questions = chain(len);
        let responses: Responses = answers
            .iter()
            .take(len)
            .enumerate()
            .filter_map(|(i, a)| a.map(|a| (format!("q{i}"), if a { "A" } else { "B" })))
            .collect();

        let first = resolve_visibility(&questions, &responses);
        let second = resolve_visibility(&questions, &responses);
        prop_assert_eq!(first.len(), len);
        prop_assert_eq!(first, second);
    }

    /// A resolved text resolves to itself when wrapped as plain text.
    #[test]
    fn text_resolution_is_idempotent(
        entries in prop::collection::vec(("[a-z]{2}", ".{0,12}"), 0..5),
        active in "[a-z]{2}",
        default in "[a-z]{2}",
    ) {
        let text = LocalizedText::localized(entries);
        let resolved = resolve(&text, &active, &default).to_string();
        let again = LocalizedText::plain(resolved.clone());
        prop_assert_eq!(resolve(&again, &active, &default), resolved.as_str());

        if resolved.is_empty() {
            prop_assert!(text.is_empty());
        }
    }
}
