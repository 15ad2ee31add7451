//! Corporate assistant: the "RAG demo" chatbot.
//!
//! DESIGN
//! ======
//! Retrieval is simulated: the inventory and HR facts a real pipeline would
//! fetch are baked into a fixed system prompt. With an LLM configured every
//! message is forwarded together with the session transcript; without one a
//! keyword matcher answers so the page still demonstrates the flow.

use tracing::info;
use uuid::Uuid;

use crate::llm::types::{ChatOptions, Message};
use crate::services::chat;
use crate::services::session::Channel;
use crate::state::AppState;

pub const GREETING: &str =
    "Hola. Soy el asistente IA de Leonardo. Tengo acceso a los datos de RH e Inventarios. ¿En qué te ayudo?";

pub const SYSTEM_PROMPT: &str = "Eres un asistente corporativo experto en dos áreas: Inventarios y RH. \n\
Datos de Inventario: Pino (500u), Roble (200u), Cedro (150u). \n\
Datos de RH: Política de vacaciones es 12 días al año. Bonos se pagan trimestralmente. \n\
Responde de forma profesional, concisa y amable.";

pub const CHAT_OPTIONS: ChatOptions = ChatOptions { max_tokens: 500, temperature: 0.5 };

/// Example questions listed next to the chat.
pub const SUGGESTED_PROMPTS: [&str; 3] = [
    "¿Cuál es el stock de material Pino?",
    "¿Cuántos días de vacaciones me tocan?",
    "Necesito un resumen del inventario.",
];

const SIMULATED_PREFIX: &str = "⚠️ **Respuesta Simulada (Falta API Key):**\n\n";

/// Handle one chat submission.
///
/// Appends exactly one user turn and one assistant turn, and returns the
/// assistant text. Blank prompts are ignored and return `None`.
pub async fn submit(state: &AppState, session_id: Uuid, prompt: &str) -> Option<String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }
    info!(%session_id, prompt_len = prompt.len(), "assistant: prompt received");

    state
        .sessions
        .append(session_id, Channel::Assistant, Message::user(prompt))
        .await;

    let reply = match &state.llm {
        Some(llm) => chat::complete(state, llm, session_id, Channel::Assistant, SYSTEM_PROMPT, CHAT_OPTIONS)
            .await
            .unwrap_or_else(|e| format!("❌ Error de conexión: {e}")),
        None => simulated_reply(prompt),
    };

    state
        .sessions
        .append(session_id, Channel::Assistant, Message::assistant(reply.clone()))
        .await;
    Some(reply)
}

/// Keyword-matched answer used when no API key is configured.
#[must_use]
pub fn simulated_reply(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let body = if mentions(&["inventario", "stock", "pino"]) {
        "Según la base de datos de Almacén: \n- **Pino**: 500 unidades \n- **Roble**: 200 unidades."
    } else if mentions(&["rh", "vacaciones"]) {
        "Según la política vigente de RH, te corresponden **12 días de vacaciones** por año trabajado."
    } else {
        "Lo siento, en modo demo solo puedo responder sobre Inventarios o RH específicos."
    };
    format!("{SIMULATED_PREFIX}{body}")
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
