
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::QuestionnaireConfig;
use crate::models::{AnswerValue, Question};
use crate::questionnaire::AnswerPrompt;
use crate::service::MatchQuizService;
use crate::store::MemoryStore;
use crate::Result;

/// Prompt that replays scripted answers in order; `None` never answers,
/// so the question runs into its deadline.
pub struct ScriptedPrompt {
    answers: Mutex<Vec<Option<AnswerValue>>>,
    events: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Option<AnswerValue>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().rev().collect()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Prompt answering every question with the given values
    pub fn answering(values: &[AnswerValue]) -> Self {
        Self::new(values.iter().copied().map(Some).collect())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl AnswerPrompt for ScriptedPrompt {
    async fn introduce(&self, total: usize) -> Result<()> {
        self.record(format!("intro {total}"));
        Ok(())
    }

    async fn announce_category(&self, category: &str) -> Result<()> {
        self.record(format!("category {category}"));
        Ok(())
    }

    async fn ask(&self, question: &Question, position: usize, total: usize) -> Result<AnswerValue> {
        self.record(format!("ask {} {position}/{total}", question.id));
        let next = self.answers.lock().unwrap().pop().flatten();
        match next {
            Some(value) => Ok(value),
            None => std::future::pending().await,
        }
    }

    async fn timed_out(&self, question: &Question) -> Result<()> {
        self.record(format!("timeout {}", question.id));
        Ok(())
    }
}

/// Service over a fresh in-memory store with a short answer deadline
pub fn memory_service() -> (Arc<MemoryStore>, MatchQuizService) {
    let store = Arc::new(MemoryStore::new());
    let settings = QuestionnaireConfig {
        answer_timeout_secs: 1,
        ..QuestionnaireConfig::default()
    };
    let service = MatchQuizService::with_store(store.clone(), settings);
    (store, service)
}
