use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MatchQuizError;

/// Question identifier, assigned once at creation and never reused
pub type QuestionId = i32;

/// Chat user identifier
pub type UserId = i64;

/// Raw per-question answer values as supplied to the scorer
pub type RawAnswers = BTreeMap<QuestionId, i64>;

/// Category used when a question is added without one
pub const DEFAULT_CATEGORY: &str = "General";

/// Answer strength on the questionnaire's fixed scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i64)]
pub enum AnswerValue {
    Skipped = 0,    // No answer before the deadline
    No = 1,         // Not for you
    Interested = 2, // Open to this
    Like = 3,       // You enjoy this
    Favorite = 4,   // You love this
}

impl AnswerValue {
    /// Every answer a user can actively choose, strongest first
    pub const CHOICES: [AnswerValue; 4] = [
        AnswerValue::Favorite,
        AnswerValue::Like,
        AnswerValue::Interested,
        AnswerValue::No,
    ];

    /// Numeric scale value
    pub const fn value(self) -> i64 {
        self as i64
    }

    pub const fn label(self) -> &'static str {
        match self {
            AnswerValue::Skipped => "Skipped",
            AnswerValue::No => "No",
            AnswerValue::Interested => "Interested",
            AnswerValue::Like => "Like",
            AnswerValue::Favorite => "Favorite",
        }
    }

    /// Reaction marker shown next to the answer
    pub const fn marker(self) -> &'static str {
        match self {
            AnswerValue::Skipped => "❓",
            AnswerValue::No => "🔴",
            AnswerValue::Interested => "🟡",
            AnswerValue::Like => "🟢",
            AnswerValue::Favorite => "🔵",
        }
    }

    pub const fn is_answered(self) -> bool {
        !matches!(self, AnswerValue::Skipped)
    }

    /// Parse free-form user input: a digit, a label, its initial, or a marker.
    pub fn parse_choice(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(choice) = Self::CHOICES.iter().find(|c| c.marker() == input) {
            return Some(*choice);
        }
        match input.to_lowercase().as_str() {
            "4" | "f" | "favorite" | "favourite" => Some(AnswerValue::Favorite),
            "3" | "l" | "like" => Some(AnswerValue::Like),
            "2" | "i" | "interested" => Some(AnswerValue::Interested),
            "1" | "n" | "no" => Some(AnswerValue::No),
            _ => None,
        }
    }
}

impl TryFrom<i64> for AnswerValue {
    type Error = MatchQuizError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnswerValue::Skipped),
            1 => Ok(AnswerValue::No),
            2 => Ok(AnswerValue::Interested),
            3 => Ok(AnswerValue::Like),
            4 => Ok(AnswerValue::Favorite),
            other => Err(MatchQuizError::InvalidValue(other)),
        }
    }
}

impl From<AnswerValue> for i64 {
    fn from(value: AnswerValue) -> Self {
        value.value()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.label())
    }
}

/// Questionnaire question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Question with its 1-based display position in the current listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedQuestion {
    pub position: usize,
    pub question: Question,
}

/// Question listing plus every category known across all questions
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListing {
    pub filter: Option<String>,
    pub questions: Vec<ListedQuestion>,
    pub categories: Vec<String>,
}

/// Question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Category with its current question count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub question_count: usize,
}

/// One answered question, with the question text captured at answer time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub question: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub value: AnswerValue,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Response {
    pub fn new(question: &Question, value: AnswerValue) -> Self {
        Self {
            question_id: question.id,
            question: question.text.clone(),
            category: question.category.clone(),
            value,
        }
    }
}

/// A user's complete set of questionnaire responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub responses: BTreeMap<QuestionId, Response>,
    pub created_at: DateTime<Utc>,
    pub match_count: i64,
}

impl Profile {
    pub fn new(user_id: UserId, username: impl Into<String>, responses: Vec<Response>) -> Self {
        Self {
            user_id,
            username: username.into(),
            responses: responses
                .into_iter()
                .map(|r| (r.question_id, r))
                .collect(),
            created_at: Utc::now(),
            match_count: 0,
        }
    }

    /// Answer values keyed by question, in the scorer's input shape
    pub fn raw_answers(&self) -> RawAnswers {
        self.responses
            .iter()
            .map(|(id, r)| (*id, r.value.value()))
            .collect()
    }

    pub fn answered_count(&self) -> usize {
        self.responses
            .values()
            .filter(|r| r.value.is_answered())
            .count()
    }

    pub fn total_responses(&self) -> usize {
        self.responses.len()
    }
}

/// Responses of one category, in question order
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponses {
    pub category: String,
    pub responses: Vec<Response>,
}

/// Profile arranged for display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user_id: UserId,
    pub username: String,
    pub categories: Vec<CategoryResponses>,
    pub completed_at: DateTime<Utc>,
    pub match_count: i64,
}

/// One ranked match for a subject profile
#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    pub user_id: UserId,
    pub username: String,
    pub score: u8,
    pub identical_answers: usize,
}

/// Full ranked match list, best first
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub user_id: UserId,
    pub total_candidates: usize,
    pub matches: Vec<MatchEntry>,
}

impl MatchReport {
    pub fn top(&self, n: usize) -> &[MatchEntry] {
        &self.matches[..n.min(self.matches.len())]
    }
}

/// Side-by-side view of one shared question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionComparison {
    pub question_id: QuestionId,
    pub question: String,
    pub yours: AnswerValue,
    pub theirs: AnswerValue,
    pub identical: bool,
}

/// Detailed comparison between two profiles
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub user: String,
    pub other: String,
    pub score: u8,
    pub strong: bool,
    pub questions: Vec<QuestionComparison>,
}

/// Leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: UserId,
    pub username: String,
    pub answered: usize,
    pub total: usize,
    pub match_count: i64,
}
