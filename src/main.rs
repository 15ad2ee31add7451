mod config;
mod error;
mod llm;
mod rate_limit;
mod render;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::llm::LlmChat;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::SiteConfig::from_env();
    let addr = config.listen_addr();

    // Non-fatal: chat pages fall back to simulated replies without a key.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; serving simulated replies");
            None
        }
    };

    if !services::contact::cv_available(&config.cv_path).await {
        tracing::warn!(path = %config.cv_path.display(), "CV file not found; download will report it inline");
    }

    let state = state::AppState::new(config, llm);

    let _sweeper = services::session::spawn_sweeper_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "portfolio listening");
    axum::serve(listener, app).await.expect("server failed");
}
