use super::error::SentenceServiceError;
use super::model::{GeneratedSentence, SentenceMode};
use super::prompt;
use crate::domain::card::DueCard;
use crate::infrastructure::repositories::ChatRepository;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

const REQUIRED_TEXT_FIELDS: [&str; 2] = ["sentence1", "sentence2"];

pub struct SentenceService {
    chat_repo: Arc<dyn ChatRepository>,
    mode: SentenceMode,
}

impl SentenceService {
    pub fn new(chat_repo: Arc<dyn ChatRepository>, mode: SentenceMode) -> Self {
        Self { chat_repo, mode }
    }
}

#[async_trait]
pub trait SentenceServiceApi: Send + Sync {
    /// Generate example sentences for one due card
    ///
    /// This operation:
    /// - Renders the mode-specific prompt for the card
    /// - Calls the chat model exactly once in JSON-object mode
    /// - Validates the reply and merges the card's id and review metadata
    async fn generate(&self, card: &DueCard) -> Result<GeneratedSentence, SentenceServiceError>;
}

#[async_trait]
impl SentenceServiceApi for SentenceService {
    async fn generate(&self, card: &DueCard) -> Result<GeneratedSentence, SentenceServiceError> {
        let messages = prompt::build_messages(card, self.mode);

        tracing::info!(
            card_id = card.id,
            mode = ?self.mode,
            payload = %messages[1].content,
            "Requesting sentences"
        );

        let raw = self
            .chat_repo
            .complete_json(&messages)
            .await
            .map_err(SentenceServiceError::Dependency)?;

        let sentence = parse_reply(&raw, card)?;

        tracing::info!(
            card_id = sentence.id,
            sentence1 = %sentence.sentence1,
            sentence2 = %sentence.sentence2,
            "Sentences generated"
        );

        Ok(sentence)
    }
}

/// Validate a model reply and merge the card's metadata into it.
///
/// Only shape and types are checked; the model's `id` and any review fields
/// it invents are replaced by the card's own values.
pub fn parse_reply(raw: &str, card: &DueCard) -> Result<GeneratedSentence, SentenceServiceError> {
    let format_error = |reason: String| SentenceServiceError::Format {
        reason,
        raw_response: Some(raw.to_string()),
    };

    let mut reply: Value = serde_json::from_str(raw)
        .map_err(|e| format_error(format!("reply is not valid JSON: {}", e)))?;
    let object = reply
        .as_object_mut()
        .ok_or_else(|| format_error("reply is not a JSON object".to_string()))?;

    for field in REQUIRED_TEXT_FIELDS {
        match object.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(format_error(format!("`{}` is not a string", field))),
            None => return Err(format_error(format!("missing field `{}`", field))),
        }
    }

    object.insert("id".to_string(), json!(card.id));
    match card.performance {
        Some(performance) => {
            object.insert("interval".to_string(), json!(performance.last_interval));
            object.insert("ease".to_string(), json!(performance.ease));
            object.insert("flags".to_string(), json!(performance.flags));
        }
        None => {
            object.remove("interval");
            object.remove("ease");
            object.remove("flags");
        }
    }

    serde_json::from_value(reply).map_err(|e| format_error(e.to_string()))
}
