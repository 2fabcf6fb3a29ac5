use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Versioned schema migrations embedded from `migrations/`.
///
/// The sentiment column on `answers` arrived as its own migration rather
/// than a runtime `PRAGMA table_info` probe, so every deployment reaches the
/// same schema through the same ordered steps.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Opens the SQLite pool, creating the database file if needed, and applies
/// pending migrations.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store at {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    info!("SQLite store ready, migrations applied");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_apply_to_fresh_database() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory store");
        MIGRATOR.run(&pool).await.expect("apply migrations");

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("list tables");

        assert!(tables.iter().any(|t| t == "candidates"));
        assert!(tables.iter().any(|t| t == "answers"));
    }

    #[tokio::test]
    async fn test_sentiment_column_defaults_to_neutral() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory store");
        MIGRATOR.run(&pool).await.expect("apply migrations");

        // An insert that predates the sentiment column still picks up the
        // migration's default.
        sqlx::query(
            "INSERT INTO answers (candidate_email, q_number, question, answer) \
             VALUES ('a@b.com', 1, 'Q?', 'A')",
        )
        .execute(&pool)
        .await
        .expect("insert legacy-shaped answer");

        let sentiment: String =
            sqlx::query_scalar("SELECT sentiment FROM answers WHERE candidate_email = 'a@b.com'")
                .fetch_one(&pool)
                .await
                .expect("read sentiment");
        assert_eq!(sentiment, "Neutral");
    }

    #[tokio::test]
    async fn test_create_pool_creates_file_and_is_rerunnable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("candidates.db");
        let url = format!("sqlite:{}", path.display());

        let pool = create_pool(&url).await.expect("first open");
        drop(pool);
        assert!(path.exists(), "database file should be created");

        // Reopening must not re-apply already-run migrations.
        let pool = create_pool(&url).await.expect("second open");
        drop(pool);
    }
}
