use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Database;
use crate::models::{Category, Question, QuestionId, DEFAULT_CATEGORY};
use crate::store::QuestionStore;
use crate::Result;

type QuestionRow = (i32, String, String, DateTime<Utc>);

fn question_from_row((id, text, category, created_at): QuestionRow) -> Question {
    Question {
        id,
        text,
        category,
        created_at,
    }
}

#[async_trait]
impl QuestionStore for Database {
    async fn add_question(&self, category: &str, text: &str) -> Result<Question> {
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            category.trim()
        };

        let mut tx = self.pool.begin().await?;

        let row: QuestionRow = sqlx::query_as(
            r"
            INSERT INTO questions (question, category)
            VALUES ($1, $2)
            RETURNING question_id, question, category, created_at
            ",
        )
        .bind(text.trim())
        .bind(category)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO categories (name, updated_at)
            VALUES ($1, NOW())
            ON CONFLICT (name) DO UPDATE SET updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(category)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(question_from_row(row))
    }

    async fn remove_question(&self, id: QuestionId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE question_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
        let row: Option<QuestionRow> = sqlx::query_as(
            "SELECT question_id, question, category, created_at FROM questions WHERE question_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(question_from_row))
    }

    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r"
            SELECT question_id, question, category, created_at
            FROM questions
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY question_id
            ",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(question_from_row).collect())
    }

    async fn question_categories(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM questions ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows: Vec<(String, DateTime<Utc>)> =
            sqlx::query_as("SELECT name, updated_at FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(name, updated_at)| Category { name, updated_at })
            .collect())
    }

    async fn count_questions(&self, category: Option<&str>) -> Result<usize> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM questions WHERE ($1::TEXT IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as usize)
    }
}
