use super::annotation::speech_text;
use super::error::SpeechServiceError;
use super::model::{audio_file_name, AudioArtifact};
use crate::domain::sentence::{GeneratedSentence, SentenceMode};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    mode: SentenceMode,
    voice: String,
}

impl SpeechService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, mode: SentenceMode, voice: String) -> Self {
        Self {
            tts_repo,
            mode,
            voice,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize a sentence pair and write it to `output_dir`
    ///
    /// This operation:
    /// - Strips ruby markup to get speakable text
    /// - Calls the TTS provider exactly once
    /// - Writes `speech-<id>.<ext>`, creating the directory if needed
    async fn synthesize(
        &self,
        sentence: &GeneratedSentence,
        output_dir: &Path,
    ) -> Result<AudioArtifact, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        sentence: &GeneratedSentence,
        output_dir: &Path,
    ) -> Result<AudioArtifact, SpeechServiceError> {
        let text = speech_text(sentence, self.mode);

        tracing::info!(
            card_id = sentence.id,
            voice = %self.voice,
            text = %text,
            "Synthesizing speech"
        );

        let audio = self
            .tts_repo
            .synthesize(&text, &self.voice)
            .await
            .map_err(SpeechServiceError::Dependency)?;

        let format = self.tts_repo.audio_format();
        let file_name = audio_file_name(sentence.id, format);
        let path = output_dir.join(&file_name);

        tokio::fs::create_dir_all(output_dir).await?;
        tokio::fs::write(&path, &audio).await?;

        tracing::info!(
            card_id = sentence.id,
            path = %path.display(),
            audio_size_bytes = audio.len(),
            "Saved audio file"
        );

        Ok(AudioArtifact {
            card_id: sentence.id,
            file_name,
            path,
            format,
        })
    }
}
