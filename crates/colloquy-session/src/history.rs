use colloquy_client::AssistantBackend;
use colloquy_types::ChatMessage;

use crate::error::{EngineError, Result};

/// Fetch a thread's full conversation, flattened for display and sorted
/// ascending by creation time; the remote service's own ordering is not
/// trusted.
pub async fn fetch_history<B: AssistantBackend + ?Sized>(
    backend: &B,
    assistant_id: &str,
    thread_id: &str,
) -> Result<Vec<ChatMessage>> {
    let mut messages = backend
        .thread_messages(assistant_id, thread_id)
        .await
        .map_err(EngineError::History)?;

    messages.sort_by_key(|message| message.created_at);
    Ok(messages.into_iter().map(ChatMessage::from_remote).collect())
}
