//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `leadchat-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, inserts on the writer
//! and reads on the reader.

use chrono::{DateTime, Utc};
use leadchat_core::chat::repository::ChatRepository;
use leadchat_types::chat::{ChatTurn, TurnRole};
use leadchat_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatTurn.
struct ChatTurnRow {
    id: String,
    session_id: String,
    role: String,
    message: String,
    created_at: String,
}

impl ChatTurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<ChatTurn, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid turn id: {e}")))?;
        let role: TurnRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatTurn {
            id,
            session_id: self.session_id,
            role,
            message: self.message,
            created_at,
        })
    }
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so that lexical order matches time order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

impl ChatRepository for SqliteChatRepository {
    async fn append_turn(&self, turn: &ChatTurn) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_turns (id, session_id, role, message, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(turn.id.to_string())
        .bind(&turn.session_id)
        .bind(turn.role.to_string())
        .bind(&turn.message)
        .bind(format_datetime(&turn.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_turns WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                ChatTurnRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use leadchat_core::chat::history::load_history;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_and_get_turns() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let user = ChatTurn::new("s1", TurnRole::User, "Hi");
        let assistant = ChatTurn::new("s1", TurnRole::Assistant, "Hello!");
        repo.append_turn(&user).await.unwrap();
        repo.append_turn(&assistant).await.unwrap();

        let turns = repo.get_turns("s1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].id, user.id);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].message, "Hi");
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[1].message, "Hello!");
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let repo = SqliteChatRepository::new(test_pool().await);
        assert!(repo.get_turns("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_turns_ordered_by_time_not_insert_order() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let mut late = ChatTurn::new("s1", TurnRole::Assistant, "later");
        late.created_at = Utc::now() + Duration::seconds(10);
        let early = ChatTurn::new("s1", TurnRole::User, "earlier");

        repo.append_turn(&late).await.unwrap();
        repo.append_turn(&early).await.unwrap();

        let messages: Vec<String> = repo
            .get_turns("s1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.message)
            .collect();
        assert_eq!(messages, vec!["earlier", "later"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let repo = SqliteChatRepository::new(test_pool().await);

        repo.append_turn(&ChatTurn::new("a", TurnRole::User, "for a"))
            .await
            .unwrap();
        repo.append_turn(&ChatTurn::new("b", TurnRole::User, "for b"))
            .await
            .unwrap();

        let turns = repo.get_turns("a").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].message, "for a");
    }

    #[tokio::test]
    async fn test_load_history_is_idempotent() {
        let repo = SqliteChatRepository::new(test_pool().await);
        repo.append_turn(&ChatTurn::new("s1", TurnRole::User, "one"))
            .await
            .unwrap();
        repo.append_turn(&ChatTurn::new("s1", TurnRole::Assistant, "two"))
            .await
            .unwrap();

        let first = load_history(&repo, "s1").await.unwrap();
        let second = load_history(&repo, "s1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_unicode_and_multiline_round_trip() {
        let repo = SqliteChatRepository::new(test_pool().await);
        let text = "name: Zoë\nemail: zoë@例え.jp";
        repo.append_turn(&ChatTurn::new("s1", TurnRole::User, text))
            .await
            .unwrap();

        let turns = repo.get_turns("s1").await.unwrap();
        assert_eq!(turns[0].message, text);
    }

    #[test]
    fn test_datetime_format_sorts_lexically() {
        let a = Utc::now();
        let b = a + Duration::milliseconds(1);
        assert!(format_datetime(&a) < format_datetime(&b));
        assert_eq!(parse_datetime(&format_datetime(&a)).unwrap().timestamp_micros(), a.timestamp_micros());
    }
}
