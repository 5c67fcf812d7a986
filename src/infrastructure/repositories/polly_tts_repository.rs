use super::tts_repository::TtsRepository;
use crate::domain::speech::AudioFormat;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Voices that support the neural engine, per the AWS Polly documentation
const NEURAL_VOICES: &[&str] = &[
    // English
    "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
    // Japanese
    "Takumi", "Kazuha", "Tomoko", // Korean
    "Seoyeon", // Mandarin Chinese
    "Zhiyu",   // Spanish
    "Lupe", "Pedro", "Sergio", // French
    "Lea", "Remi", // German
    "Vicki", "Daniel",
];

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Neural when the voice supports it, standard otherwise
    fn engine_for_voice(voice: &str) -> Engine {
        if NEURAL_VOICES.contains(&voice) {
            Engine::Neural
        } else {
            Engine::Standard
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice_id = VoiceId::from(voice);
        let engine = Self::engine_for_voice(voice);

        tracing::info!(
            voice = voice,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(audio_bytes)
    }

    fn audio_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }
}
