use super::tts_repository::TtsRepository;
use crate::domain::speech::AudioFormat;
use async_trait::async_trait;

const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";
const USER_AGENT: &str = "anki-sentences";

/// Azure Speech (cognitive services REST API) implementation of TTS repository
pub struct AzureTtsRepository {
    http_client: reqwest::Client,
    subscription_key: String,
    endpoint: String,
}

impl AzureTtsRepository {
    pub fn new(subscription_key: String, region: &str) -> Self {
        Self::with_endpoint(
            subscription_key,
            format!("https://{}.tts.speech.microsoft.com/cognitiveservices/v1", region),
        )
    }

    pub fn with_endpoint(subscription_key: String, endpoint: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            subscription_key,
            endpoint,
        }
    }

    /// Wrap the text in a single-voice SSML document.
    ///
    /// The document language is the voice's locale prefix (`ja-JP` for
    /// `ja-JP-NanamiNeural`).
    fn ssml(text: &str, voice: &str) -> String {
        let locale = voice
            .match_indices('-')
            .nth(1)
            .map(|(index, _)| &voice[..index])
            .unwrap_or("en-US");
        format!(
            "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
            locale,
            html_escape::encode_single_quoted_attribute(voice),
            html_escape::encode_text(text)
        )
    }
}

#[async_trait]
impl TtsRepository for AzureTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice = voice,
            output_format = OUTPUT_FORMAT,
            text_length = text.len(),
            "Calling Azure Speech synthesis"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", USER_AGENT)
            .body(Self::ssml(text, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = voice, "Azure Speech request failed");
                format!("Azure Speech request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                body = %error_text,
                voice = voice,
                "Azure Speech returned an error status"
            );
            return Err(format!(
                "Azure Speech error ({}): {}",
                status.as_u16(),
                error_text
            ));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Azure Speech audio: {}", e))?
            .to_vec();

        tracing::info!(
            provider = "azure",
            voice = voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(audio_bytes)
    }

    fn audio_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }
}
