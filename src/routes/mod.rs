//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page is server-rendered HTML. Chat submissions use post/redirect/get
//! so a browser refresh never resubmits a prompt; the vision upload renders
//! its result directly because the annotated images are not stored anywhere.
//! Static assets are served from the configured directory under `/static`.

pub mod analytics;
pub mod assistant;
pub mod contact;
pub mod vision;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render::{self, Page};
use crate::state::AppState;

/// Headroom for multipart framing on top of the raw image limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let upload_limit = state
        .config
        .vision_max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(home))
        .route("/chat", get(assistant::page).post(assistant::submit))
        .route("/chat/reset", post(assistant::reset))
        .route("/vision", get(vision::page))
        .route(
            "/vision/inspect",
            post(vision::inspect).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/analytics", get(analytics::page))
        .route("/analytics/data.csv", get(analytics::download_csv))
        .route("/analytics/chat", post(analytics::submit))
        .route("/analytics/chat/reset", post(analytics::reset))
        .route("/contact", get(contact::page))
        .route("/contact/cv", get(contact::download_cv))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap a page body in the site layout.
pub(crate) fn page_html(page: Page, body: &str) -> Html<String> {
    Html(render::layout(page, body))
}

async fn home() -> Html<String> {
    page_html(Page::Home, &render::home::render())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
