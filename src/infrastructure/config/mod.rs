use crate::domain::sentence::SentenceMode;
use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Card store
    pub anki_db_path: PathBuf,
    pub backup_dir: PathBuf,
    pub deck_ids: Vec<i64>,
    pub include_performance: bool,
    // Output
    pub output_root: PathBuf,
    pub sentence_mode: SentenceMode,
    pub log_format: LogFormat,
    // Chat model
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    // Speech
    pub tts_provider: TtsProvider,
    pub tts_voice: String,
    pub azure_speech_key: Option<String>,
    pub azure_speech_region: String,
    pub aws_region: String,
    pub openai_tts_model: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Azure,
    Polly,
    OpenAi,
}

impl TtsProvider {
    /// Voice used when `TTS_VOICE` is not set.
    pub fn default_voice(&self, mode: SentenceMode) -> &'static str {
        match (self, mode) {
            (TtsProvider::Azure, SentenceMode::Annotated) => "ja-JP-NanamiNeural",
            (TtsProvider::Azure, SentenceMode::Plain) => "en-US-EmmaNeural",
            (TtsProvider::Polly, SentenceMode::Annotated) => "Kazuha",
            (TtsProvider::Polly, SentenceMode::Plain) => "Joanna",
            (TtsProvider::OpenAi, _) => "alloy",
        }
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "azure" => Ok(TtsProvider::Azure),
            "polly" => Ok(TtsProvider::Polly),
            "openai" => Ok(TtsProvider::OpenAi),
            other => Err(AppError::Config(format!(
                "unknown TTS_PROVIDER '{}', expected azure, polly or openai",
                other
            ))),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let sentence_mode: SentenceMode = env::var("SENTENCE_MODE")
            .unwrap_or_else(|_| "annotated".to_string())
            .parse()?;
        let tts_provider: TtsProvider = env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "azure".to_string())
            .parse()?;

        let azure_speech_key = env::var("AZURE_SPEECH_KEY").ok();
        if tts_provider == TtsProvider::Azure && azure_speech_key.is_none() {
            return Err(Box::new(AppError::Config(
                "AZURE_SPEECH_KEY must be set when TTS_PROVIDER is azure".to_string(),
            )));
        }

        let config = Config {
            anki_db_path: env::var("ANKI_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_collection_path()),
            backup_dir: env::var("BACKUP_DIR")
                .unwrap_or_else(|_| "backup".to_string())
                .into(),
            deck_ids: parse_deck_ids(&env::var("DECK_IDS").unwrap_or_default())
                .map_err(|e| AppError::Config(format!("DECK_IDS: {}", e)))?,
            include_performance: env::var("INCLUDE_PERFORMANCE")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(true),
            output_root: env::var("OUTPUT_ROOT")
                .unwrap_or_else(|_| "generated_files".to_string())
                .into(),
            sentence_mode,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4-1106-preview".to_string()),
            tts_provider,
            tts_voice: env::var("TTS_VOICE")
                .unwrap_or_else(|_| tts_provider.default_voice(sentence_mode).to_string()),
            azure_speech_key,
            azure_speech_region: env::var("AZURE_SPEECH_REGION")
                .unwrap_or_else(|_| "eastasia".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-1".to_string()),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
        };

        Ok(config)
    }
}

/// Parse a comma-separated list of deck ids. Blank input means no filter.
pub fn parse_deck_ids(raw: &str) -> Result<Vec<i64>, ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Location of the desktop client's default profile collection.
fn default_collection_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Anki2")
        .join("User 1")
        .join("collection.anki2")
}
