use crate::domain::card::CardPerformance;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// How sentences are requested, spoken and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceMode {
    /// Logographic target language: `sentence1` carries ruby readings and
    /// `sentence2` is its translation.
    Annotated,
    /// Any deck: two sentences using the note in context.
    Plain,
}

impl std::str::FromStr for SentenceMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annotated" | "ruby" => Ok(SentenceMode::Annotated),
            "plain" => Ok(SentenceMode::Plain),
            other => Err(AppError::Config(format!(
                "unknown SENTENCE_MODE '{}', expected annotated or plain",
                other
            ))),
        }
    }
}

/// A validated model reply with the source card's metadata merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSentence {
    pub sentence1: String,
    pub sentence2: String,
    pub id: i64,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub ease: Option<i64>,
    #[serde(default)]
    pub flags: Option<i64>,
}

impl GeneratedSentence {
    pub fn performance(&self) -> Option<CardPerformance> {
        match (self.interval, self.ease, self.flags) {
            (Some(last_interval), Some(ease), Some(flags)) => Some(CardPerformance {
                last_interval,
                ease,
                flags,
            }),
            _ => None,
        }
    }
}
