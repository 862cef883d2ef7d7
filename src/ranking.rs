//! Rank candidate profiles against a subject, best match first

use serde::Serialize;

use crate::compatibility::score;
use crate::models::RawAnswers;
use crate::Result;

/// A candidate with its compatibility score against the subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate<Id> {
    pub candidate: Id,
    pub score: u8,
}

/// Score every candidate against `subject` and order them best-first.
///
/// Candidates with equal scores keep their input order. The full list is
/// returned; picking a top-N is left to the caller.
pub fn rank<Id: Clone>(
    subject: &RawAnswers,
    candidates: &[(Id, RawAnswers)],
) -> Result<Vec<RankedCandidate<Id>>> {
    let mut ranked = candidates
        .iter()
        .map(|(candidate, answers)| {
            score(subject, answers).map(|score| RankedCandidate {
                candidate: candidate.clone(),
                score,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable: ties stay in input order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(ranked)
}
