use crate::domain::speech::AudioFormat;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Azure Speech, AWS Polly, OpenAI)
///
/// Implementations are responsible for:
/// - Provider-specific request encoding (SSML, SDK requests)
/// - Returning the whole audio stream for one call
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech with the given voice
    ///
    /// # Arguments
    /// * `text` - Plain speakable text (no ruby markup)
    /// * `voice` - Provider-specific voice identifier
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String>;

    /// Container format of the audio this provider returns
    fn audio_format(&self) -> AudioFormat;
}
