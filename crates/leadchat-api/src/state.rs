//! Application state wiring the chat pipeline together.
//!
//! AppState holds the concrete pipeline used by both CLI commands and HTTP
//! handlers. The pipeline is generic over its repositories; AppState pins it
//! to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use leadchat_core::chat::context::ContextBuilder;
use leadchat_core::chat::pipeline::ChatPipeline;
use leadchat_core::lead::rules::LeadRules;
use leadchat_core::llm::completion::CompletionClient;
use leadchat_infra::llm::create_provider;
use leadchat_infra::notify::build_notifier;
use leadchat_infra::sqlite::chat::SqliteChatRepository;
use leadchat_infra::sqlite::lead::SqliteLeadRepository;
use leadchat_infra::sqlite::pool::DatabasePool;
use leadchat_types::config::AppConfig;

pub type ConcretePipeline = ChatPipeline<SqliteChatRepository, SqliteLeadRepository>;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ConcretePipeline>,
    pub db_pool: DatabasePool,
    pub web_dir: PathBuf,
}

impl AppState {
    /// Connect to the store and wire the pipeline from configuration.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::connect(&config.database).await?;

        let provider = create_provider(&config.model)?;

        let pipeline = ChatPipeline::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteLeadRepository::new(db_pool.clone()),
            ContextBuilder::from_config(&config.chat),
            CompletionClient::new(provider),
            LeadRules::from_config(&config.chat),
            build_notifier(config),
        );

        Ok(Self::new(
            pipeline,
            db_pool,
            PathBuf::from(&config.server.web_dir),
        ))
    }

    pub fn new(pipeline: ConcretePipeline, db_pool: DatabasePool, web_dir: PathBuf) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            db_pool,
            web_dir,
        }
    }
}
