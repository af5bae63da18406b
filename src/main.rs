use std::sync::Arc;

use phishguard::config::AppConfig;
use phishguard::llm::{CompletionApi, LlmClient};
use phishguard::services::persistence::{AnalysisStore, PgAnalysisStore};
use phishguard::{db, routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // Database is optional: without it analyses are not recorded.
    let pool = match &config.database_url {
        Some(url) => Some(
            db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed"),
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; persistence and simulation routes disabled");
            None
        }
    };
    let store = pool
        .clone()
        .map(|pool| Arc::new(PgAnalysisStore::new(pool)) as Arc<dyn AnalysisStore>);

    // Initialize LLM client (non-fatal: the analyze endpoint answers 500 if missing).
    let llm = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client) as Arc<dyn CompletionApi>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; analysis disabled");
            None
        }
    };

    let state = state::AppState::new(llm, store, pool, config.analysis);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "phishguard listening");
    axum::serve(listener, app).await.expect("server failed");
}
