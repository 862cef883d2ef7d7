use std::collections::HashMap;

use tracing::{debug, info};

use super::MatchQuizService;
use crate::compatibility::{identical_answers, score_profiles};
use crate::models::{
    Comparison, LeaderboardEntry, MatchEntry, MatchReport, Profile, QuestionComparison, UserId,
};
use crate::ranking::rank;
use crate::{MatchQuizError, Result};

impl MatchQuizService {
    /// Rank every other profile against the user's and record the match count.
    pub async fn find_matches(&self, user_id: UserId) -> Result<MatchReport> {
        let subject = self.require_profile(user_id).await?;
        let others = self.profiles.list_profiles_except(user_id).await?;

        if others.is_empty() {
            debug!("No candidates for user {}", user_id);
            self.profiles.update_match_count(user_id, 0).await?;
            return Ok(MatchReport {
                user_id,
                total_candidates: 0,
                matches: Vec::new(),
            });
        }

        let subject_answers = subject.raw_answers();
        let candidates: Vec<_> = others
            .iter()
            .map(|profile| (profile.user_id, profile.raw_answers()))
            .collect();
        let ranked = rank(&subject_answers, &candidates)?;

        self.profiles
            .update_match_count(user_id, ranked.len() as i64)
            .await?;

        let by_id: HashMap<UserId, (&Profile, usize)> = others
            .iter()
            .zip(&candidates)
            .map(|(profile, (_, answers))| {
                (
                    profile.user_id,
                    (profile, identical_answers(&subject_answers, answers)),
                )
            })
            .collect();

        let matches = ranked
            .into_iter()
            .filter_map(|entry| {
                by_id
                    .get(&entry.candidate)
                    .map(|(profile, identical)| MatchEntry {
                        user_id: profile.user_id,
                        username: profile.username.clone(),
                        score: entry.score,
                        identical_answers: *identical,
                    })
            })
            .collect::<Vec<_>>();

        info!(
            "Ranked {} candidates for user {} (best: {:?})",
            matches.len(),
            user_id,
            matches.first().map(|m| m.score)
        );

        Ok(MatchReport {
            user_id,
            total_candidates: matches.len(),
            matches,
        })
    }

    /// Question-by-question comparison of two users' profiles
    pub async fn compare(&self, user_id: UserId, other_id: UserId) -> Result<Comparison> {
        if user_id == other_id {
            return Err(MatchQuizError::SelfComparison);
        }

        let yours = self.require_profile(user_id).await?;
        let theirs = self.require_profile(other_id).await?;

        let compatibility = score_profiles(&yours, &theirs)?;

        let questions = yours
            .responses
            .iter()
            .filter_map(|(id, mine)| {
                theirs.responses.get(id).map(|other| QuestionComparison {
                    question_id: *id,
                    question: mine.question.clone(),
                    yours: mine.value,
                    theirs: other.value,
                    identical: mine.value == other.value,
                })
            })
            .collect();

        Ok(Comparison {
            user: yours.username,
            other: theirs.username,
            score: compatibility,
            strong: compatibility >= self.settings.strong_match_threshold,
            questions,
        })
    }

    /// Most recent profiles with completion and match counts
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let profiles = self.profiles.list_recent_profiles(limit).await?;

        Ok(profiles
            .into_iter()
            .enumerate()
            .map(|(index, profile)| LeaderboardEntry {
                rank: index + 1,
                user_id: profile.user_id,
                answered: profile.answered_count(),
                total: profile.total_responses(),
                match_count: profile.match_count,
                username: profile.username,
            })
            .collect())
    }

    async fn require_profile(&self, user_id: UserId) -> Result<Profile> {
        self.profiles
            .get_profile(user_id)
            .await?
            .ok_or(MatchQuizError::ProfileNotFound(user_id))
    }
}
