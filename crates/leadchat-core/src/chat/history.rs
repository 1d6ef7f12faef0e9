//! History loading for prompt assembly.

use leadchat_types::chat::HistoryEntry;
use leadchat_types::error::RepositoryError;

use super::repository::ChatRepository;

/// Load a session's prior turns as role/message pairs, oldest first.
///
/// Timestamps are only used for ordering (by the repository) and are not
/// returned. Unknown sessions yield an empty vector. Read-only.
pub async fn load_history<C: ChatRepository>(
    repo: &C,
    session_id: &str,
) -> Result<Vec<HistoryEntry>, RepositoryError> {
    let turns = repo.get_turns(session_id).await?;
    Ok(turns.into_iter().map(HistoryEntry::from).collect())
}
