//! Answer collection for one questionnaire run
//!
//! The presenter supplies an [`AnswerPrompt`]; this module decides when to
//! ask, enforces the per-question deadline, and turns a missed deadline into
//! a skipped answer.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{AnswerValue, Question, Response};
use crate::Result;

/// What happened while waiting for one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answered(AnswerValue),
    TimedOut,
}

impl AnswerOutcome {
    /// Value to record; a timeout is recorded as skipped
    pub const fn value(self) -> AnswerValue {
        match self {
            AnswerOutcome::Answered(value) => value,
            AnswerOutcome::TimedOut => AnswerValue::Skipped,
        }
    }
}

/// Presentation-side hooks used while running the questionnaire
#[async_trait]
pub trait AnswerPrompt: Send + Sync {
    /// Called once before the first question.
    async fn introduce(&self, total: usize) -> Result<()>;

    /// Called whenever the category changes from the previous question.
    async fn announce_category(&self, category: &str) -> Result<()>;

    /// Ask one question and wait for the user's choice.
    ///
    /// The caller cancels this future when the deadline passes, so it must
    /// not hold state that needs cleanup.
    async fn ask(&self, question: &Question, position: usize, total: usize)
        -> Result<AnswerValue>;

    /// Called after a question was skipped because its deadline passed.
    async fn timed_out(&self, question: &Question) -> Result<()>;
}

/// Ask one question, giving up after `deadline`.
pub async fn collect_answer<P: AnswerPrompt + ?Sized>(
    prompt: &P,
    question: &Question,
    position: usize,
    total: usize,
    deadline: Duration,
) -> Result<AnswerOutcome> {
    match tokio::time::timeout(deadline, prompt.ask(question, position, total)).await {
        Ok(answer) => Ok(AnswerOutcome::Answered(answer?)),
        Err(_) => {
            tracing::debug!("Question #{} timed out after {:?}", question.id, deadline);
            prompt.timed_out(question).await?;
            Ok(AnswerOutcome::TimedOut)
        }
    }
}

/// Ask every question in order and return the responses.
///
/// `questions` must already be in display order.
pub async fn run_questionnaire<P: AnswerPrompt + ?Sized>(
    prompt: &P,
    questions: &[Question],
    deadline: Duration,
) -> Result<Vec<Response>> {
    let total = questions.len();
    prompt.introduce(total).await?;

    let mut responses = Vec::with_capacity(total);
    let mut current_category: Option<&str> = None;

    for (index, question) in questions.iter().enumerate() {
        if current_category != Some(question.category.as_str()) {
            current_category = Some(question.category.as_str());
            prompt.announce_category(&question.category).await?;
        }

        let outcome = collect_answer(prompt, question, index + 1, total, deadline).await?;
        responses.push(Response::new(question, outcome.value()));
    }

    Ok(responses)
}
