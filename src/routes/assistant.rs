//! Corporate assistant routes: `GET /chat`, `POST /chat`, `POST /chat/reset`.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use super::page_html;
use crate::render::{self, Page};
use crate::services::{assistant, session};
use crate::services::session::Channel;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub prompt: String,
}

/// `GET /chat`: transcript plus input form.
pub async fn page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, session_id) = session::session_id(jar);
    let turns = state.sessions.transcript(session_id, Channel::Assistant).await;
    let body = render::chat::render(&turns, state.llm_model());
    (jar, page_html(Page::Chat, &body))
}

/// `POST /chat`: append one exchange, then redirect back to the page.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChatForm>,
) -> (CookieJar, Redirect) {
    let (jar, session_id) = session::session_id(jar);
    assistant::submit(&state, session_id, &form.prompt).await;
    (jar, Redirect::to(Page::Chat.path()))
}

/// `POST /chat/reset`: start the conversation over.
pub async fn reset(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let (jar, session_id) = session::session_id(jar);
    state.sessions.reset(session_id, Channel::Assistant).await;
    info!(%session_id, "assistant: transcript reset");
    (jar, Redirect::to(Page::Chat.path()))
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
