use super::Database;
use crate::MatchQuizError;
use crate::Result;

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let required_tables = vec!["questions", "categories", "profiles"];

        for table_name in required_tables {
            let result = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !result {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(MatchQuizError::Custom(
                "❌ Database schema not initialized!\n\n\
                 Please run the following command to initialize the database:\n\n\
                 \x1b[1;32mmatchquiz init\x1b[0m"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        // Question ids come from a sequence and are never reassigned
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS questions (
                question_id SERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'General',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id BIGSERIAL PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Responses are kept as one JSON document per profile
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT UNIQUE NOT NULL,
                username TEXT NOT NULL,
                responses JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                match_count BIGINT NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_created_at ON profiles(created_at DESC)")
            .execute(&self.pool)
            .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
