//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/agent/backend traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use ynity_core::agent::box_client::BoxAgentClient;
use ynity_core::agent::router::AgentRouter;
use ynity_core::chapter::service::ChapterService;
use ynity_core::chat::composer::ResponseComposer;
use ynity_core::chat::service::ChatService;
use ynity_core::summarize::pipeline::{PipelineSettings, SummarizationPipeline};
use ynity_core::transcribe::service::Transcriber;
use ynity_infra::agent::http::HttpAgentClient;
use ynity_infra::artifact::local::LocalArtifactBackend;
use ynity_infra::artifact::voice::SpeechSynthesizer;
use ynity_infra::config::{load_global_config, public_dir, resolve_data_dir};
use ynity_infra::groq::client::GroqCompletionClient;
use ynity_infra::http::build_http_client;
use ynity_infra::secret::env::EnvSecrets;
use ynity_infra::sqlite::chapter::SqliteChapterRepository;
use ynity_infra::sqlite::conversation::SqliteConversationRepository;
use ynity_infra::sqlite::pool::{DatabasePool, database_url};
use ynity_infra::whisper::client::WhisperTranscriptionClient;
use ynity_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteConversationRepository, LocalArtifactBackend>;

pub type ConcreteSummarizer = SummarizationPipeline<GroqCompletionClient>;

pub type ConcreteChapterService = ChapterService<SqliteChapterRepository, HttpAgentClient>;

pub type ConcreteTranscriber = Transcriber<WhisperTranscriptionClient>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub summarizer: Arc<ConcreteSummarizer>,
    pub chapter_service: Arc<ConcreteChapterService>,
    pub transcriber: Arc<ConcreteTranscriber>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize from the environment: data dir, `config.toml`, API keys.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;
        let config = load_global_config(&data_dir).await;
        Self::build(data_dir, config, EnvSecrets::from_env()).await
    }

    /// Connect to the database and wire every service.
    pub async fn build(
        data_dir: PathBuf,
        config: GlobalConfig,
        secrets: EnvSecrets,
    ) -> anyhow::Result<Self> {
        let db_url = format!("{}?mode=rwc", database_url(&data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        let public_dir = public_dir(&data_dir);
        tokio::fs::create_dir_all(&public_dir).await?;

        let http = build_http_client()?;
        let agents = &config.agents;

        // Chat: coach + QA agents, artifacts written under public/
        let router = AgentRouter::new(
            BoxAgentClient::new(HttpAgentClient::new(http.clone(), "coach", &agents.coach_url)),
            BoxAgentClient::new(HttpAgentClient::new(
                http.clone(),
                "assistant",
                &agents.assistant_url,
            )),
        );
        let artifacts = LocalArtifactBackend::new(
            public_dir.clone(),
            SpeechSynthesizer::new(http.clone(), secrets.elevenlabs_api_key, &config.voice),
            HttpAgentClient::new(http.clone(), "image", &agents.image_url),
        );
        let chat_service = ChatService::new(
            SqliteConversationRepository::new(db_pool.clone()),
            router,
            ResponseComposer::new(artifacts),
            config.conversation.max_messages,
        );

        // Summarization
        let completion =
            GroqCompletionClient::new(http.clone(), secrets.groq_api_key, &config.summarizer);
        let summarizer =
            SummarizationPipeline::new(completion, PipelineSettings::from(&config.summarizer));

        // Voice questions
        let transcriber = Transcriber::new(WhisperTranscriptionClient::new(
            http.clone(),
            secrets.openai_api_key,
            &config.transcription,
        ));

        // Chapters
        let chapter_service = ChapterService::new(
            SqliteChapterRepository::new(db_pool.clone()),
            HttpAgentClient::new(http, "chapter", &agents.chapter_url),
        );

        tracing::info!(
            data_dir = %data_dir.display(),
            model = %config.summarizer.model,
            "Application state initialized"
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            summarizer: Arc::new(summarizer),
            chapter_service: Arc::new(chapter_service),
            transcriber: Arc::new(transcriber),
            config: Arc::new(config),
            data_dir,
            public_dir,
            db_pool,
        })
    }
}
