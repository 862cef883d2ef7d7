use thiserror::Error;

use crate::models::QuestionId;
use crate::models::UserId;

#[derive(Error, Debug)]
pub enum MatchQuizError {
    #[error("Invalid answer value: {0} (expected 0-4)")]
    InvalidValue(i64),

    #[error("Question not found: #{0}")]
    QuestionNotFound(QuestionId),

    #[error("Profile not found: user {0}")]
    ProfileNotFound(UserId),

    #[error("Profile already exists: user {0}")]
    ProfileExists(UserId),

    #[error("No questions available")]
    NoQuestions,

    #[error("Cannot compare a profile with itself")]
    SelfComparison,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, MatchQuizError>;
