use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Container format returned by a speech provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Audio written for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub card_id: i64,
    pub file_name: String,
    pub path: PathBuf,
    pub format: AudioFormat,
}

/// File name for a card's audio, unique per card id.
pub fn audio_file_name(card_id: i64, format: AudioFormat) -> String {
    format!("speech-{}.{}", card_id, format.extension())
}
