//! ChatRepository trait definition.
//!
//! The turn log is append-only: turns are inserted and queried, never
//! updated or deleted. Follows the RPITIT pattern used by every port in
//! this crate.

use leadchat_types::chat::ChatTurn;
use leadchat_types::error::RepositoryError;

/// Repository trait for chat turn persistence.
///
/// Implementations live in leadchat-infra (e.g., `SqliteChatRepository`).
/// Concurrent appends to the same session must not require caller-side
/// locking; each append is an independent insert.
pub trait ChatRepository: Send + Sync {
    /// Append a turn to the log.
    fn append_turn(
        &self,
        turn: &ChatTurn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all turns for a session, ordered by created_at ASC.
    ///
    /// An unknown session yields an empty vector, not an error.
    fn get_turns(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;
}
