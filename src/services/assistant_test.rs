use super::*;
use std::sync::Arc;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Role};
use crate::state::test_helpers::{self, MockLlm};

// =========================================================================
// simulated_reply
// =========================================================================

#[test]
fn simulated_reply_answers_inventory() {
    let reply = simulated_reply("¿Cuál es el STOCK de material?");
    assert!(reply.starts_with("⚠️ **Respuesta Simulada (Falta API Key):**"));
    assert!(reply.contains("**Pino**: 500 unidades"));
}

#[test]
fn simulated_reply_answers_vacations() {
    let reply = simulated_reply("¿Cuántos días de Vacaciones me tocan?");
    assert!(reply.contains("12 días de vacaciones"));
}

#[test]
fn simulated_reply_inventory_wins_over_hr() {
    let reply = simulated_reply("inventario y vacaciones");
    assert!(reply.contains("Almacén"));
}

#[test]
fn simulated_reply_out_of_scope() {
    let reply = simulated_reply("¿Qué hora es?");
    assert!(reply.contains("solo puedo responder sobre Inventarios o RH"));
}

// =========================================================================
// submit
// =========================================================================

#[tokio::test]
async fn submit_appends_exactly_one_user_and_one_assistant_turn() {
    let state = test_helpers::test_app_state();
    let session = Uuid::new_v4();
    let before = state.sessions.transcript(session, Channel::Assistant).await.len();

    let reply = submit(&state, session, "  ¿stock de pino?  ").await.unwrap();

    let turns = state.sessions.transcript(session, Channel::Assistant).await;
    assert_eq!(turns.len(), before + 2);
    assert_eq!(turns[before], Message::user("¿stock de pino?"));
    assert_eq!(turns[before + 1].role, Role::Assistant);
    assert_eq!(turns[before + 1].content, reply);
}

#[tokio::test]
async fn submit_ignores_blank_prompt() {
    let state = test_helpers::test_app_state();
    let session = Uuid::new_v4();

    assert!(submit(&state, session, "   ").await.is_none());
    assert_eq!(state.sessions.transcript(session, Channel::Assistant).await.len(), 1);
}

#[tokio::test]
async fn submit_forwards_system_prompt_and_history_to_llm() {
    let mock = Arc::new(MockLlm::replying("Tenemos 500 unidades de Pino."));
    let llm: Arc<dyn LlmChat> = mock.clone();
    let state = test_helpers::test_app_state_with_llm(llm);
    let session = Uuid::new_v4();

    let reply = submit(&state, session, "¿Stock de Pino?").await.unwrap();

    assert_eq!(reply, "Tenemos 500 unidades de Pino.");
    let calls = mock.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].system, SYSTEM_PROMPT);
    assert_eq!(calls[0].options, CHAT_OPTIONS);
    assert_eq!(calls[0].messages[0], Message::assistant(GREETING));
    assert_eq!(calls[0].messages[1], Message::user("¿Stock de Pino?"));
}

#[tokio::test]
async fn submit_surfaces_llm_failure_inline() {
    let llm: Arc<dyn LlmChat> = Arc::new(MockLlm::new(vec![Err(LlmError::ApiRequest("connection refused".into()))]));
    let state = test_helpers::test_app_state_with_llm(llm);
    let session = Uuid::new_v4();

    let reply = submit(&state, session, "hola").await.unwrap();

    assert_eq!(reply, "❌ Error de conexión: API request failed: connection refused");
    let turns = state.sessions.transcript(session, Channel::Assistant).await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2].content, reply);
}
