//! Outbound ports of the advisor.

use async_trait::async_trait;

/// A chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Answer `user_message` under `system_prompt`.
    ///
    /// # Errors
    /// Any transport, status or decoding failure. Callers treat every error
    /// as recoverable.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> anyhow::Result<String>;
}
