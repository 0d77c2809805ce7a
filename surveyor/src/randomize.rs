//! Question and option shuffling.
//!
//! All shuffles are Fisher–Yates via [`SliceRandom::shuffle`]. Callers pass
//! the RNG, so sessions can use a seeded [`rand_chacha::ChaCha8Rng`] to get
//! reproducible orders.

use std::ops::Range;

use rand::Rng;
use rand::seq::SliceRandom;
use surveyor_types::{ChoiceOption, Question};

/// Shuffle a slice in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Split a sequence into contiguous sections.
///
/// Every element for which `is_break` holds starts a new section and is the
/// first element of that section. Elements before the first break form a
/// leading section of their own.
pub fn sections<T>(items: &[T], is_break: impl Fn(&T) -> bool) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (index, item) in items.iter().enumerate() {
        if is_break(item) && index > start {
            ranges.push(start..index);
            start = index;
        }
    }
    if start < items.len() {
        ranges.push(start..items.len());
    }
    ranges
}

/// Shuffle each section independently, keeping sections in their original order.
pub fn shuffle_within_sections<T, R: Rng + ?Sized>(
    items: &mut [T],
    is_break: impl Fn(&T) -> bool,
    rng: &mut R,
) {
    for range in sections(items, is_break) {
        items[range].shuffle(rng);
    }
}

/// The order in which a session presents questions, as indices into `questions`.
///
/// With `randomize` off this is the authored order. With `respect_sections`
/// on, each run starting at a `section_break` is shuffled on its own;
/// otherwise the whole sequence is shuffled as one unit.
pub fn question_order<R: Rng + ?Sized>(
    questions: &[Question],
    randomize: bool,
    respect_sections: bool,
    rng: &mut R,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..questions.len()).collect();
    if !randomize {
        return order;
    }

    if respect_sections {
        shuffle_within_sections(&mut order, |&index| questions[index].is_section_break(), rng);
    } else {
        order.shuffle(rng);
    }

    tracing::debug!(?order, respect_sections, "Randomized question order");
    order
}

/// The options of a question in presentation order.
///
/// Shuffled on every call when `randomize` is set, so each presentation may
/// see a different order.
pub fn presented_options<'a, R: Rng + ?Sized>(
    question: &'a Question,
    rng: &mut R,
) -> Vec<&'a ChoiceOption> {
    let mut options: Vec<&ChoiceOption> = question.kind.options().iter().collect();
    if question.kind.randomizes_options() {
        options.shuffle(rng);
    }
    options
}
