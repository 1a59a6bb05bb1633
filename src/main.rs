use podcast_studio::controllers::{files::FilesController, podcast::PodcastController};
use podcast_studio::domain::podcast::{new_synthesis_cache, PodcastCollaborators};
use podcast_studio::infrastructure::config::{Config, LogFormat, TtsProvider};
use podcast_studio::infrastructure::http::{build_router, start_http_server};
use podcast_studio::infrastructure::repositories::{
    BaasStorageRepository, OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Podcast Studio on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        development = config.is_development(),
        tts_provider = config.tts_provider.as_str(),
        storage_deployment = %config.storage_deployment_url,
        tts_cache_enabled = config.tts_cache_enabled,
        step_timeout_secs = config.generation_step_timeout_secs,
        "Configuration loaded"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Speech synthesis provider
    let tts_repo = create_tts_repository(&config).await?;

    // 2. Storage deployment client
    let storage_repo = Arc::new(BaasStorageRepository::new(
        reqwest::Client::new(),
        config.storage_deployment_url.clone(),
        config.storage_admin_key.clone(),
    ));

    // 3. Workflow collaborators
    let mut collaborators = PodcastCollaborators::new(
        tts_repo.clone(),
        storage_repo.clone(),
        storage_repo.clone(),
        storage_repo.clone(),
    )
    .with_step_timeout(config.generation_step_timeout());
    if config.tts_cache_enabled {
        collaborators = collaborators.with_cache(new_synthesis_cache());
    }

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let files_controller = Arc::new(FilesController::new(storage_repo));
    let podcast_controller = Arc::new(PodcastController::new(collaborators));

    let app = build_router(tts_repo, files_controller, podcast_controller);
    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    match config.tts_provider {
        TtsProvider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_PROVIDER=openai")?;
            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            tracing::info!(model = %config.openai_tts_model, "OpenAI TTS client initialized");
            Ok(Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
            )))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            tracing::info!("AWS Polly client initialized successfully");

            Ok(Arc::new(PollyTtsRepository::new(Arc::new(polly_client))))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "podcast_studio=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
