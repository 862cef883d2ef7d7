use tracing::{info, warn};

use super::MatchQuizService;
use crate::models::{CategoryResponses, Profile, ProfileView, UserId};
use crate::questionnaire::{run_questionnaire, AnswerPrompt};
use crate::{MatchQuizError, Result};

impl MatchQuizService {
    /// Run the questionnaire for a user without a profile and store the result.
    pub async fn take_questionnaire<P: AnswerPrompt + ?Sized>(
        &self,
        user_id: UserId,
        username: &str,
        prompt: &P,
    ) -> Result<Profile> {
        let questions = self.questions.list_questions(None).await?;
        if questions.is_empty() {
            return Err(MatchQuizError::NoQuestions);
        }

        if self.profiles.get_profile(user_id).await?.is_some() {
            return Err(MatchQuizError::ProfileExists(user_id));
        }

        info!(
            "User {} ({}) started the questionnaire: {} questions",
            user_id,
            username,
            questions.len()
        );

        let responses =
            run_questionnaire(prompt, &questions, self.settings.answer_timeout()).await?;

        let profile = Profile::new(user_id, username, responses);
        self.profiles.insert_profile(&profile).await?;

        info!(
            "Stored profile for user {}: {}/{} answered",
            user_id,
            profile.answered_count(),
            profile.total_responses()
        );
        Ok(profile)
    }

    /// Delete a user's profile so the questionnaire can be taken again.
    /// Returns `false` when the user had no profile.
    pub async fn retake(&self, user_id: UserId) -> Result<bool> {
        let deleted = self.profiles.delete_profile(user_id).await?;
        if deleted {
            info!("Deleted profile for user {} (retake)", user_id);
        } else {
            warn!("Retake requested by user {} without a profile", user_id);
        }
        Ok(deleted)
    }

    pub async fn profile(&self, user_id: UserId) -> Result<ProfileView> {
        let profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .ok_or(MatchQuizError::ProfileNotFound(user_id))?;

        Ok(profile_view(profile))
    }
}

/// Group responses by category, categories ordered by their first question
fn profile_view(profile: Profile) -> ProfileView {
    let mut categories: Vec<CategoryResponses> = Vec::new();
    for response in profile.responses.into_values() {
        match categories
            .iter_mut()
            .find(|group| group.category == response.category)
        {
            Some(group) => group.responses.push(response),
            None => categories.push(CategoryResponses {
                category: response.category.clone(),
                responses: vec![response],
            }),
        }
    }

    ProfileView {
        user_id: profile.user_id,
        username: profile.username,
        categories,
        completed_at: profile.created_at,
        match_count: profile.match_count,
    }
}
