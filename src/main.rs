use anki_sentences::domain::pipeline::StudyPipeline;
use anki_sentences::domain::sentence::SentenceService;
use anki_sentences::domain::speech::SpeechService;
use anki_sentences::error::AppError;
use anki_sentences::infrastructure::config::{Config, LogFormat, TtsProvider};
use anki_sentences::infrastructure::repositories::{
    AzureTtsRepository, OpenAiChatRepository, OpenAiTtsRepository, PollyTtsRepository,
    TtsRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        store = %config.anki_db_path.display(),
        output_root = %config.output_root.display(),
        mode = ?config.sentence_mode,
        deck_ids = ?config.deck_ids,
        "Starting sentence generation run"
    );

    let openai_client = Arc::new(OpenAiChatRepository::client(
        &config.openai_api_key,
        config.openai_api_base.as_deref(),
    ));

    // 1. Instantiate repositories
    let chat_repo = Arc::new(OpenAiChatRepository::new(
        openai_client.clone(),
        config.openai_model.clone(),
    ));
    let tts_repo = create_tts_repository(&config, openai_client).await?;
    tracing::info!(
        provider = ?config.tts_provider,
        voice = %config.tts_voice,
        audio_format = %tts_repo.audio_format(),
        "TTS provider initialized"
    );

    // 2. Instantiate services
    let sentence_service = Arc::new(SentenceService::new(chat_repo, config.sentence_mode));
    let speech_service = Arc::new(SpeechService::new(
        tts_repo,
        config.sentence_mode,
        config.tts_voice.clone(),
    ));

    // 3. Run the pipeline
    let pipeline = StudyPipeline::new(Arc::new(config), sentence_service, speech_service);
    if let Err(err) = pipeline.run().await {
        err.log();
        std::process::exit(err.exit_code());
    }

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
    openai_client: Arc<async_openai::Client<async_openai::config::OpenAIConfig>>,
) -> Result<Arc<dyn TtsRepository>, AppError> {
    let repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Azure => {
            let key = config.azure_speech_key.clone().ok_or_else(|| {
                AppError::Config("AZURE_SPEECH_KEY must be set when TTS_PROVIDER is azure".to_string())
            })?;
            Arc::new(AzureTtsRepository::new(key, &config.azure_speech_region))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            Arc::new(PollyTtsRepository::new(Arc::new(polly_client)))
        }
        TtsProvider::OpenAi => Arc::new(OpenAiTtsRepository::new(
            openai_client,
            config.openai_tts_model.clone(),
        )),
    };
    Ok(repo)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "anki_sentences=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "anki_sentences=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
