use tracing::info;

use super::MatchQuizService;
use crate::models::{CategorySummary, ListedQuestion, Question, QuestionId, QuestionListing};
use crate::{MatchQuizError, Result};

impl MatchQuizService {
    /// Add a question under `category`
    pub async fn add_question(&self, category: &str, text: &str) -> Result<Question> {
        if text.trim().is_empty() {
            return Err(MatchQuizError::Custom(
                "Question text must not be empty".to_string(),
            ));
        }

        let question = self.questions.add_question(category, text).await?;
        info!(
            "Added question #{} in category '{}'",
            question.id, question.category
        );
        Ok(question)
    }

    /// Remove a question by id; other questions keep their ids.
    pub async fn remove_question(&self, id: QuestionId) -> Result<()> {
        if self.questions.remove_question(id).await? {
            info!("Removed question #{}", id);
            Ok(())
        } else {
            Err(MatchQuizError::QuestionNotFound(id))
        }
    }

    /// List questions in display order, optionally for one category
    pub async fn list_questions(&self, category: Option<&str>) -> Result<QuestionListing> {
        let questions = self.questions.list_questions(category).await?;
        let categories = self.questions.question_categories().await?;

        Ok(QuestionListing {
            filter: category.map(str::to_string),
            questions: questions
                .into_iter()
                .enumerate()
                .map(|(index, question)| ListedQuestion {
                    position: index + 1,
                    question,
                })
                .collect(),
            categories,
        })
    }

    /// Every known category with its current question count
    pub async fn categories(&self) -> Result<Vec<CategorySummary>> {
        let mut summaries = Vec::new();
        for category in self.questions.list_categories().await? {
            let question_count = self.questions.count_questions(Some(&category.name)).await?;
            summaries.push(CategorySummary {
                name: category.name,
                question_count,
            });
        }
        Ok(summaries)
    }
}
