use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{ProfileStore, QuestionStore};
use crate::models::{Category, Profile, Question, QuestionId, UserId, DEFAULT_CATEGORY};
use crate::{MatchQuizError, Result};

/// In-process store for questions and profiles.
///
/// Nothing is persisted; data lives as long as the store. Listing order is
/// kept with an insertion sequence so results match the PostgreSQL store.
#[derive(Debug)]
pub struct MemoryStore {
    questions: DashMap<QuestionId, Question>,
    categories: DashMap<String, (u64, Category)>,
    profiles: DashMap<UserId, (u64, Profile)>,
    next_question_id: AtomicI32,
    sequence: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: DashMap::new(),
            categories: DashMap::new(),
            profiles: DashMap::new(),
            next_question_id: AtomicI32::new(1),
            sequence: AtomicU64::new(0),
        }
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn sorted_profiles(&self) -> Vec<(u64, Profile)> {
        let mut profiles: Vec<(u64, Profile)> = self
            .profiles
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        profiles.sort_by_key(|(seq, _)| *seq);
        profiles
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn add_question(&self, category: &str, text: &str) -> Result<Question> {
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            category.trim()
        };
        let now = Utc::now();
        let question = Question {
            id: self.next_question_id.fetch_add(1, Ordering::Relaxed),
            text: text.trim().to_string(),
            category: category.to_string(),
            created_at: now,
        };
        self.questions.insert(question.id, question.clone());

        let seq = self.next_sequence();
        self.categories
            .entry(category.to_string())
            .and_modify(|(_, existing)| existing.updated_at = now)
            .or_insert_with(|| {
                (
                    seq,
                    Category {
                        name: category.to_string(),
                        updated_at: now,
                    },
                )
            });

        Ok(question)
    }

    async fn remove_question(&self, id: QuestionId) -> Result<bool> {
        Ok(self.questions.remove(&id).is_some())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
        Ok(self.questions.get(&id).map(|q| q.value().clone()))
    }

    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .map(|q| q.value().clone())
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn question_categories(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .questions
            .iter()
            .map(|q| q.category.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<(u64, Category)> = self
            .categories
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        categories.sort_by_key(|(seq, _)| *seq);
        Ok(categories.into_iter().map(|(_, c)| c).collect())
    }

    async fn count_questions(&self, category: Option<&str>) -> Result<usize> {
        Ok(self
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .count())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().1.clone()))
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        let seq = self.next_sequence();
        match self.profiles.entry(profile.user_id) {
            Entry::Occupied(_) => Err(MatchQuizError::ProfileExists(profile.user_id)),
            Entry::Vacant(slot) => {
                slot.insert((seq, profile.clone()));
                Ok(())
            }
        }
    }

    async fn delete_profile(&self, user_id: UserId) -> Result<bool> {
        Ok(self.profiles.remove(&user_id).is_some())
    }

    async fn list_profiles_except(&self, user_id: UserId) -> Result<Vec<Profile>> {
        Ok(self
            .sorted_profiles()
            .into_iter()
            .map(|(_, p)| p)
            .filter(|p| p.user_id != user_id)
            .collect())
    }

    async fn list_recent_profiles(&self, limit: usize) -> Result<Vec<Profile>> {
        Ok(self
            .sorted_profiles()
            .into_iter()
            .rev()
            .take(limit)
            .map(|(_, p)| p)
            .collect())
    }

    async fn update_match_count(&self, user_id: UserId, match_count: i64) -> Result<()> {
        if let Some(mut entry) = self.profiles.get_mut(&user_id) {
            entry.value_mut().1.match_count = match_count;
        }
        Ok(())
    }
}
