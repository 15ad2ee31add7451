//! Home page: hero, about card, stack badges, specialty cards.

const STACK: [&str; 4] = ["Rust", "Axum", "Groq API", "Llama 3"];

const SPECIALTIES: [(&str, &str); 3] = [
    (
        "Asistentes RAG",
        "Chatbots corporativos que responden consultas usando tus propios PDF y bases de datos.",
    ),
    (
        "Computer Vision",
        "Detección automática de defectos y control de calidad 24/7 en líneas de producción.",
    ),
    (
        "Predicción de Datos",
        "Modelos de ML que analizan tendencias históricas para optimizar inventarios.",
    ),
];

#[must_use]
pub fn render() -> String {
    let badges: String = STACK
        .iter()
        .map(|item| format!(r#"<span class="badge">{item}</span>"#))
        .collect();
    let cards: String = SPECIALTIES
        .iter()
        .map(|(title, text)| format!(r#"<div class="card card--accent"><h4>{title}</h4><p>{text}</p></div>"#))
        .collect();

    format!(
        r#"<section class="hero">
<h1 class="hero-title">Ingeniería de IA Aplicada</h1>
<h4 class="hero-subtitle">Soluciones de Inteligencia Artificial para el mundo real.</h4>
</section>
<section class="bento bento--wide">
<div class="card">
<h3>Sobre el Portafolio</h3>
<p>Este sitio es una <strong>Proof of Concept (PoC)</strong> interactiva. Interactúa con agentes de IA reales, sistemas de visión artificial y tableros predictivos conectados a modelos LLM.</p>
<p><strong>Misión:</strong> Automatizar procesos complejos con tecnología de vanguardia.</p>
</div>
<div class="card">
<h3>Stack Tecnológico</h3>
<div class="badges">{badges}</div>
</div>
</section>
<h3>Áreas de Especialización</h3>
<section class="bento bento--thirds">{cards}</section>"#
    )
}
