use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::JsonValue;

use super::Database;
use crate::models::{AnswerValue, Profile, QuestionId, Response, UserId, DEFAULT_CATEGORY};
use crate::store::ProfileStore;
use crate::{MatchQuizError, Result};

/// Response as stored in the `responses` JSON document.
///
/// The value stays a raw integer here so that out-of-scale data written by
/// other tools surfaces as `InvalidValue` instead of a generic decode error.
#[derive(Debug, Serialize, Deserialize)]
struct StoredResponse {
    question: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    name: Option<String>,
    value: i64,
}

impl From<&Response> for StoredResponse {
    fn from(response: &Response) -> Self {
        Self {
            question: response.question.clone(),
            category: Some(response.category.clone()),
            emoji: Some(response.value.marker().to_string()),
            name: Some(response.value.label().to_string()),
            value: response.value.value(),
        }
    }
}

type ProfileRow = (i64, String, JsonValue, DateTime<Utc>, i64);

fn profile_from_row(row: ProfileRow) -> Result<Profile> {
    let (user_id, username, responses, created_at, match_count) = row;
    let stored: BTreeMap<QuestionId, StoredResponse> = serde_json::from_value(responses)?;

    let responses = stored
        .into_iter()
        .map(|(question_id, r)| -> Result<(QuestionId, Response)> {
            Ok((
                question_id,
                Response {
                    question_id,
                    question: r.question,
                    category: r.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    value: AnswerValue::try_from(r.value)?,
                },
            ))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(Profile {
        user_id,
        username,
        responses,
        created_at,
        match_count,
    })
}

/// LIMIT parameter for a `usize` limit; Postgres rejects negative values
fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

const PROFILE_COLUMNS: &str = "user_id, username, responses, created_at, match_count";

#[async_trait]
impl ProfileStore for Database {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(profile_from_row).transpose()
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        let stored: BTreeMap<QuestionId, StoredResponse> = profile
            .responses
            .iter()
            .map(|(id, r)| (*id, StoredResponse::from(r)))
            .collect();
        let responses = serde_json::to_value(&stored)?;

        let result = sqlx::query(
            r"
            INSERT INTO profiles (user_id, username, responses, created_at, match_count)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(profile.user_id)
        .bind(&profile.username)
        .bind(responses)
        .bind(profile.created_at)
        .bind(profile.match_count)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(MatchQuizError::ProfileExists(profile.user_id));
        }
        Ok(())
    }

    async fn delete_profile(&self, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_profiles_except(&self, user_id: UserId) -> Result<Vec<Profile>> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id <> $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(profile_from_row).collect()
    }

    async fn list_recent_profiles(&self, limit: usize) -> Result<Vec<Profile>> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(profile_from_row).collect()
    }

    async fn update_match_count(&self, user_id: UserId, match_count: i64) -> Result<()> {
        let result = sqlx::query("UPDATE profiles SET match_count = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(match_count)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("No profile to update match count for user {}", user_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(responses: JsonValue) -> ProfileRow {
        (5, "tester".to_string(), responses, Utc::now(), 2)
    }

    #[test]
    fn decodes_stored_responses() {
        let profile = profile_from_row(row(json!({
            "3": {"question": "Beach?", "category": "Travel", "emoji": "🟢", "name": "Like", "value": 3},
            "1": {"question": "Spicy?", "value": 0}
        })))
        .unwrap();

        assert_eq!(profile.match_count, 2);
        assert_eq!(profile.responses[&3].value, AnswerValue::Like);
        assert_eq!(profile.responses[&3].category, "Travel");
        assert_eq!(profile.responses[&1].category, DEFAULT_CATEGORY);
        assert_eq!(profile.responses[&1].value, AnswerValue::Skipped);
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        let result = profile_from_row(row(json!({"1": {"value": 2}})));
        assert!(matches!(result, Err(MatchQuizError::Serialization(_))));

        let result = profile_from_row(row(json!(["not", "a", "map"])));
        assert!(matches!(result, Err(MatchQuizError::Serialization(_))));
    }

    #[test]
    fn out_of_scale_value_is_invalid() {
        let result = profile_from_row(row(json!({"1": {"question": "Q?", "value": 9}})));
        assert!(matches!(result, Err(MatchQuizError::InvalidValue(9))));
    }

    #[test]
    fn stored_form_keeps_integer_value() {
        let question = crate::models::Question {
            id: 4,
            text: "Jazz?".to_string(),
            category: "Music".to_string(),
            created_at: Utc::now(),
        };
        let stored = StoredResponse::from(&Response::new(&question, AnswerValue::Favorite));
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["value"], 4);
        assert_eq!(value["name"], "Favorite");
    }

    #[test]
    fn limit_is_clamped_to_postgres_range() {
        assert_eq!(limit_param(10), 10);
        assert_eq!(limit_param(usize::MAX), i64::MAX);
    }
}
