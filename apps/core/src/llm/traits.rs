use crate::error::AppError;
use crate::llm::messages::{ChatMessage, SamplingParams};
use async_trait::async_trait;

/// Defines the public interface for a chat-completion backend.
///
/// The assembler only depends on this trait, so tests can substitute a
/// scripted client for the remote API.
#[async_trait]
pub trait LlmClient: Send + Sync + 'static {
    /// Sends the messages and returns the generated text.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, AppError>;

    /// Whether the backend has what it needs to attempt a call.
    fn is_configured(&self) -> bool {
        true
    }
}
