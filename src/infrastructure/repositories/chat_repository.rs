use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Repository for chat completions that must answer with a JSON object.
/// Abstracts the underlying model provider (OpenAI or any compatible endpoint).
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Send the conversation in JSON-object mode and return the raw reply text.
    ///
    /// # Errors
    /// Returns error if the provider call fails or the reply has no content.
    /// The reply itself is not parsed here.
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String, String>;
}
