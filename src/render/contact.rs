//! Contact page.

use super::{Tone, escape_html, notice};
use crate::services::contact::{EMAIL, LOCATION, MessageLinks, WHATSAPP_DISPLAY, whatsapp_direct_link};

pub struct ContactView<'a> {
    pub name: &'a str,
    pub msg: &'a str,
    pub links: &'a MessageLinks,
    /// Inline CV problem, e.g. the file is missing.
    pub cv_error: Option<String>,
}

#[must_use]
pub fn render(view: &ContactView<'_>) -> String {
    let cv = match &view.cv_error {
        None => r#"<a class="button" href="/contact/cv" download>📥 Descargar CV (PDF)</a>"#.to_string(),
        Some(e) => notice(Tone::Error, &escape_html(e)),
    };

    format!(
        r#"<header class="page-header"><h1>Contacto Profesional</h1></header>
<div class="card">
<h4>¿Listo para innovar?</h4>
<p>Estoy disponible para proyectos de transformación digital, desarrollo de MVPs de IA y consultoría técnica.</p>
</div>
<section class="split split--even">
<div>
<h3>Datos de Contacto</h3>
<p>📱 <strong>WhatsApp Directo:</strong></p>
<a class="button button--whatsapp" href="{direct}" target="_blank" rel="noopener">💬 Abrir Chat ({WHATSAPP_DISPLAY})</a>
<p>📧 <strong>Email Profesional:</strong></p>
<p>{EMAIL}</p>
<p>📍 <strong>Ubicación:</strong></p>
<p>{LOCATION}</p>
<hr>
<h3>📄 Currículum Vitae</h3>
{cv}
</div>
<div>
<h3>Envíame un mensaje rápido</h3>
<p>Elige tu canal preferido para iniciar la prospección:</p>
<form class="card contact-form" method="get" action="/contact">
<label>Tu Nombre / Empresa<input type="text" name="name" value="{name}"></label>
<label>Asunto o Mensaje<textarea name="msg" rows="4">{msg}</textarea></label>
<button type="submit" class="button-ghost">Preparar mensaje</button>
</form>
<div class="split split--even">
<a class="button-outline button-outline--whatsapp" href="{whatsapp}" target="_blank" rel="noopener">📲 Enviar por WhatsApp</a>
<a class="button-outline button-outline--email" href="{mailto}">📧 Enviar por Correo</a>
</div>
</div>
</section>"#,
        direct = whatsapp_direct_link(),
        name = escape_html(view.name),
        msg = escape_html(view.msg),
        whatsapp = escape_html(&view.links.whatsapp),
        mailto = escape_html(&view.links.mailto),
    )
}
