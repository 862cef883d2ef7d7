//! Repository traits for questions and profiles
//!
//! The command layer receives its stores explicitly; nothing reaches for a
//! process-wide handle. [`crate::database::Database`] implements both traits
//! on PostgreSQL and [`MemoryStore`] keeps everything in process.

mod memory;

use async_trait::async_trait;

pub use memory::MemoryStore;

use crate::models::{Category, Profile, Question, QuestionId, UserId};
use crate::Result;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Store a new question under the next unused id, upserting its category.
    async fn add_question(&self, category: &str, text: &str) -> Result<Question>;

    /// Delete a question. Returns `false` if no question had this id.
    /// Remaining questions keep their ids.
    async fn remove_question(&self, id: QuestionId) -> Result<bool>;

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>>;

    /// Questions ordered by id, optionally restricted to one category.
    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>>;

    /// Distinct categories of the current questions, sorted by name.
    async fn question_categories(&self) -> Result<Vec<String>>;

    /// Every category ever used, in insertion order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn count_questions(&self, category: Option<&str>) -> Result<usize>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>>;

    /// Insert a profile. Fails with `ProfileExists` if the user already has one.
    async fn insert_profile(&self, profile: &Profile) -> Result<()>;

    /// Delete a profile. Returns `false` if the user had none.
    async fn delete_profile(&self, user_id: UserId) -> Result<bool>;

    /// All profiles except `user_id`, in creation order.
    async fn list_profiles_except(&self, user_id: UserId) -> Result<Vec<Profile>>;

    /// Most recently created profiles first.
    async fn list_recent_profiles(&self, limit: usize) -> Result<Vec<Profile>>;

    /// Overwrite the denormalized match count. Missing profiles are ignored.
    async fn update_match_count(&self, user_id: UserId, match_count: i64) -> Result<()>;
}
