//! Compatibility scoring between two response sets
//!
//! Each question both profiles answered contributes a similarity in 0..=100:
//! identical values earn full credit, and every step of distance on the
//! answer scale costs `STEP_PENALTY` points, floored at zero. The profile
//! score is the mean over shared questions, rounded half-to-even.
//!
//! Skipped answers (0) take part as the bottom of the scale.

use std::collections::BTreeMap;

use crate::models::{AnswerValue, Profile, QuestionId, RawAnswers};
use crate::Result;

/// Points lost per unit of distance on the answer scale
pub const STEP_PENALTY: i64 = 33;

/// Score for identical answers
pub const FULL_CREDIT: i64 = 100;

/// Similarity of two answers to the same question, 0..=100
pub fn similarity(a: AnswerValue, b: AnswerValue) -> i64 {
    if a == b {
        FULL_CREDIT
    } else {
        let distance = (a.value() - b.value()).abs();
        (FULL_CREDIT - STEP_PENALTY * distance).max(0)
    }
}

/// Compatibility percentage between two raw response sets.
///
/// Every value in both maps must be on the 0..=4 scale, shared or not;
/// anything else is rejected with [`crate::MatchQuizError::InvalidValue`].
/// Profiles with no question in common score 0.
pub fn score(a: &RawAnswers, b: &RawAnswers) -> Result<u8> {
    let a = decode(a)?;
    let b = decode(b)?;

    let mut total = 0i64;
    let mut shared = 0i64;
    for (id, value_a) in &a {
        if let Some(value_b) = b.get(id) {
            total += similarity(*value_a, *value_b);
            shared += 1;
        }
    }

    if shared == 0 {
        return Ok(0);
    }

    Ok(round_half_even(total, shared) as u8)
}

/// Compatibility between two decoded profiles
pub fn score_profiles(a: &Profile, b: &Profile) -> Result<u8> {
    score(&a.raw_answers(), &b.raw_answers())
}

/// Number of shared questions answered with the same value
pub fn identical_answers(a: &RawAnswers, b: &RawAnswers) -> usize {
    a.iter()
        .filter(|(id, value)| b.get(*id) == Some(*value))
        .count()
}

/// Integer division of `numerator / denominator` rounded half-to-even.
///
/// `denominator` must be positive and `numerator` non-negative.
pub(crate) fn round_half_even(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

fn decode(answers: &RawAnswers) -> Result<BTreeMap<QuestionId, AnswerValue>> {
    answers
        .iter()
        .map(|(id, raw)| AnswerValue::try_from(*raw).map(|value| (*id, value)))
        .collect()
}
