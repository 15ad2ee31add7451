use super::*;
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::llm::LlmChat;
use crate::llm::types::{Message, Role};
use crate::state::test_helpers::{self, MockLlm, response_text};

/// A jar as the extractor builds it from a request's `Cookie` header.
fn jar_for(id: Uuid) -> CookieJar {
    let mut headers = HeaderMap::new();
    let cookie = format!("{}={id}", session::COOKIE_NAME);
    headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
    CookieJar::from_headers(&headers)
}

fn form(prompt: &str) -> Form<ChatForm> {
    Form(ChatForm { prompt: prompt.into() })
}

#[tokio::test]
async fn page_renders_greeting_and_issues_cookie() {
    let state = test_helpers::test_app_state();

    let response = page(State(state.clone()), CookieJar::new()).await.into_response();

    assert!(response.headers().get(header::SET_COOKIE).is_some());
    assert!(state.sessions.is_empty().await);
    let (status, body) = response_text(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Asistente Corporativo (RAG Demo)"));
    assert!(body.contains("Soy el asistente IA de Leonardo"));
    assert!(body.contains("Modo Demo (Sin API Key)"));
}

#[tokio::test]
async fn page_shows_connected_model() {
    let llm: Arc<dyn LlmChat> = Arc::new(MockLlm::new(vec![]));
    let state = test_helpers::test_app_state_with_llm(llm);

    let (_, body) = response_text(page(State(state), CookieJar::new()).await.into_response()).await;

    assert!(body.contains("<code>mock-model</code>"));
}

#[tokio::test]
async fn submit_appends_one_exchange_and_redirects() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();

    let response = submit(State(state.clone()), jar_for(id), form("¿Stock de pino?"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/chat");
    assert!(response.headers().get(header::SET_COOKIE).is_none(), "existing cookie is reused");

    let turns = state.sessions.transcript(id, Channel::Assistant).await;
    let roles: Vec<Role> = turns.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(turns[1], Message::user("¿Stock de pino?"));
    assert!(turns[2].content.contains("500 unidades"));

    let (_, body) = response_text(page(State(state), jar_for(id)).await.into_response()).await;
    assert!(body.contains("¿Stock de pino?"));
}

#[tokio::test]
async fn submit_blank_prompt_changes_nothing() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();

    let response = submit(State(state.clone()), jar_for(id), form("   ")).await.into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.sessions.transcript(id, Channel::Assistant).await.len(), 1);
}

#[tokio::test]
async fn submit_without_cookie_sets_one() {
    let state = test_helpers::test_app_state();

    let response = submit(State(state.clone()), CookieJar::new(), form("hola")).await.into_response();

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("portfolio_session="));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn reset_restores_greeting() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();
    submit(State(state.clone()), jar_for(id), form("vacaciones")).await;

    let response = reset(State(state.clone()), jar_for(id)).await.into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.sessions.transcript(id, Channel::Assistant).await.len(), 1);
}
