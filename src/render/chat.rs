//! Corporate assistant page.

use std::fmt::Write as _;

use super::{Tone, chat_form, chat_log, escape_html, expander, notice, page_header};
use crate::llm::types::Message;
use crate::services::assistant::SUGGESTED_PROMPTS;

const HOW_IT_WORKS: &str = r#"<p><strong>Tecnología Subyacente:</strong> Este chat utiliza un modelo <strong>Llama 3.3 (70B)</strong> alojado en <strong>Groq</strong> para una latencia mínima.</p>
<p><strong>Arquitectura Simulada (RAG - Retrieval Augmented Generation):</strong></p>
<ol>
<li><strong>Input:</strong> El usuario hace una pregunta (ej. "¿Cuántas vacaciones tengo?").</li>
<li><strong>Retrieval (Simulado):</strong> El sistema buscaría en una base de datos vectorial documentos relevantes (políticas de RH, tablas de inventario).</li>
<li><strong>Augmentation:</strong> Se inyecta esa información en el "prompt" del modelo.</li>
<li><strong>Generación:</strong> El modelo genera una respuesta natural y precisa basada <em>solo</em> en los datos de la empresa.</li>
</ol>
<p><strong>Capacidades del Bot:</strong> En esta demo, el bot tiene "instrucciones de sistema" para actuar como un experto en Inventarios y RH.</p>"#;

/// Render the chat page for one transcript. `model` is `None` in demo mode.
#[must_use]
pub fn render(turns: &[Message], model: Option<&str>) -> String {
    let mut suggestions = String::from("<ul class=\"suggestions\">");
    for prompt in SUGGESTED_PROMPTS {
        let _ = write!(suggestions, "<li><em>'{}'</em></li>", escape_html(prompt));
    }
    suggestions.push_str("</ul>");

    let status = match model {
        Some(model) => notice(
            Tone::Success,
            &format!("✅ <strong>API Conectada</strong><br>Modelo: <code>{}</code>", escape_html(model)),
        ),
        None => notice(Tone::Warning, "⚠️ <strong>Modo Demo (Sin API Key)</strong><br>Respuestas simuladas."),
    };

    format!(
        r#"{header}
{about}
<hr>
<section class="split split--chat">
<div class="chat-panel">
{log}
{form}
</div>
<aside class="side-panel">
{try_this}
{suggestions}
{status}
</aside>
</section>"#,
        header = page_header("Asistente Corporativo (RAG Demo)", "Consultas sobre Recursos Humanos e Inventario"),
        about = expander("¿Cómo funciona este módulo? (Detalles Técnicos)", HOW_IT_WORKS),
        log = chat_log(turns, "🤖"),
        form = chat_form("/chat", "/chat/reset", "Escribe tu mensaje aquí...", &[]),
        try_this = notice(Tone::Info, "<strong>Prueba preguntar:</strong>"),
    )
}
