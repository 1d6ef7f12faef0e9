//! SQLite store: one serialized writer, a small reader pool, WAL journal.
//!
//! Chat turns and leads are only ever inserted, so a single writer
//! connection is enough; history reads and the health check go through the
//! reader pool and never block on an in-flight insert.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use leadchat_types::config::DatabaseConfig;

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader/writer pools over one SQLite database.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the store named by `config.url` (see `DEFAULT_DATABASE_URL`).
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        Self::new(&config.url).await
    }

    /// Open the database at `database_url`, creating it if missing.
    ///
    /// Migrations run on the writer before the reader pool opens, so readers
    /// always see the current schema.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(url = %database_url, "SQLite store open");
        Ok(Self { reader, writer })
    }

    /// Round trip on the reader pool, for `/health`.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.reader).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(dir: &tempfile::TempDir, file: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", dir.path().join(file).display()),
        }
    }

    #[tokio::test]
    async fn migrations_create_turn_and_lead_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&temp_config(&dir, "tables.db")).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["chat_turns", "leads"]);
    }

    #[tokio::test]
    async fn writer_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&temp_config(&dir, "wal.db")).await.unwrap();

        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn reader_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&temp_config(&dir, "ro.db")).await.unwrap();

        let result = sqlx::query("DELETE FROM chat_turns").execute(&pool.reader).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn ping_fails_once_closed() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&temp_config(&dir, "ping.db")).await.unwrap();

        assert!(pool.ping().await.is_ok());
        pool.reader.close().await;
        assert!(pool.ping().await.is_err());
    }

    #[tokio::test]
    async fn reopening_existing_store_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir, "reopen.db");

        let first = DatabasePool::connect(&config).await.unwrap();
        first.writer.close().await;
        first.reader.close().await;

        assert!(DatabasePool::connect(&config).await.is_ok());
    }
}
