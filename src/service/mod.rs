//! Command layer: the operations the questionnaire bot exposes
//!
//! Each operation reads and writes through the injected stores and returns
//! plain data for a presenter to render. Operations are split by domain:
//! - questions: question administration and listing
//! - profiles: taking, retaking, and viewing the questionnaire
//! - matches: ranking, comparison, leaderboard

mod matches;
mod profiles;
mod questions;

use std::sync::Arc;

use crate::config::QuestionnaireConfig;
use crate::store::{ProfileStore, QuestionStore};

/// Questionnaire bot operations over injected stores
#[derive(Clone)]
pub struct MatchQuizService {
    questions: Arc<dyn QuestionStore>,
    profiles: Arc<dyn ProfileStore>,
    settings: QuestionnaireConfig,
}

impl MatchQuizService {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        profiles: Arc<dyn ProfileStore>,
        settings: QuestionnaireConfig,
    ) -> Self {
        Self {
            questions,
            profiles,
            settings,
        }
    }

    /// Build a service over one store implementing both traits
    pub fn with_store<S>(store: Arc<S>, settings: QuestionnaireConfig) -> Self
    where
        S: QuestionStore + ProfileStore + 'static,
    {
        Self::new(store.clone(), store, settings)
    }

    pub fn settings(&self) -> &QuestionnaireConfig {
        &self.settings
    }
}
