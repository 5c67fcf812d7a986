use super::chat_repository::{ChatMessage, ChatRepository, ChatRole};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat completions implementation of the chat repository
pub struct OpenAiChatRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiChatRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    /// Build a client for api.openai.com or any compatible base URL.
    pub fn client(api_key: &str, api_base: Option<&str>) -> Client<OpenAIConfig> {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        Client::with_config(config)
    }
}

fn to_request_messages(
    messages: &[ChatMessage],
) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    messages
        .iter()
        .map(|message| {
            Ok(match message.role {
                ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.clone())
                    .build()?
                    .into(),
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()?
                    .into(),
            })
        })
        .collect()
}

#[async_trait]
impl ChatRepository for OpenAiChatRepository {
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(to_request_messages(messages).map_err(|e| e.to_string())?)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| format!("Failed to build chat request: {}", e))?;

        tracing::debug!(
            model = %self.model,
            message_count = messages.len(),
            "Calling OpenAI chat completion API"
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "OpenAI chat completion call failed"
            );
            format!("OpenAI chat error: {}", e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| "OpenAI chat completion returned no content".to_string())?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            reply_length = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}
