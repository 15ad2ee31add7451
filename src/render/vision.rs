//! Vision demo page: QA inspection tab and design-variant tab.

use std::fmt::Write as _;

use super::{Tone, escape_html, expander, notice, page_header};
use crate::services::vision::{InspectionMode, InspectionReport, Verdict, VisionError};

const ABOUT: &str = r#"<p><strong>¿Qué simula este módulo?</strong> Esta es una demostración conceptual del flujo de trabajo de un sistema de <strong>Inspección de Calidad (QA)</strong> industrial. En un entorno de producción real, este proceso ocurre en milisegundos para filtrar piezas defectuosas automáticamente.</p>
<p><strong>Stack Tecnológico (Implementación Real):</strong></p>
<ul>
<li><strong>Algoritmos:</strong> Detección de objetos con redes neuronales convolucionales (<strong>YOLOv8</strong>, <strong>Faster R-CNN</strong>) o librerías de visión clásica (<strong>OpenCV</strong>).</li>
<li><strong>Hardware:</strong> Cámaras industriales de alta velocidad + GPUs en el borde (Edge Computing) para inferencia sin latencia.</li>
<li><strong>Beneficio de Negocio:</strong> Elimina el error humano, permite operación 24/7 y reduce costos por devoluciones de productos defectuosos.</li>
</ul>
<p><strong>⚠️ Nota sobre esta Demo:</strong> <em>Esta página no ejecuta un modelo de visión pesado en tiempo real. En su lugar, ilustra la <strong>experiencia de usuario</strong> y la <strong>lógica de decisión</strong> (Aprobar/Rechazar) que implementaríamos en una solución de fábrica real.</em></p>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Inspection,
    Design,
}

/// Everything the vision page shows for one request.
#[derive(Debug, Default)]
pub struct VisionView {
    pub tab: Tab,
    pub mode: InspectionMode,
    pub outcome: Option<Result<InspectionReport, VisionError>>,
    /// Set once the visitor pressed the variant button.
    pub variant_requested: bool,
}

#[must_use]
pub fn render(view: &VisionView) -> String {
    let (qc_class, design_class) = match view.tab {
        Tab::Inspection => ("tab tab--active", "tab"),
        Tab::Design => ("tab", "tab tab--active"),
    };
    let panel = match view.tab {
        Tab::Inspection => inspection_panel(view),
        Tab::Design => design_panel(view.variant_requested),
    };

    format!(
        r#"{header}
{about}
<nav class="tabs">
<a class="{qc_class}" href="/vision">Detección de Defectos (Demo QC)</a>
<a class="{design_class}" href="/vision?tab=design">Generación de Variaciones (Demo Diseño)</a>
</nav>
{panel}"#,
        header = page_header("Visión por Computadora Industrial", "Automatización de Calidad y Diseño"),
        about = expander("Detalles Técnicos y Propósito de la Demo", ABOUT),
    )
}

fn inspection_panel(view: &VisionView) -> String {
    let mut radios = String::new();
    for mode in InspectionMode::ALL {
        let checked = if mode == view.mode { " checked" } else { "" };
        let _ = write!(
            radios,
            r#"<label class="radio"><input type="radio" name="mode" value="{}"{checked}> {}</label>"#,
            mode.as_str(),
            mode.label()
        );
    }

    let result = match &view.outcome {
        None => String::new(),
        Some(Ok(report)) => report_html(report),
        Some(Err(e)) => notice(Tone::Error, &format!("❌ {}", escape_html(&e.to_string()))),
    };

    format!(
        r#"<section class="tab-panel">
<h3>Control de Calidad Automatizado</h3>
{intro}
<form class="vision-form" method="post" action="/vision/inspect" enctype="multipart/form-data">
<h5>Controles de Simulación (Demo)</h5>
<fieldset class="radios"><legend>Resultado Esperado:</legend>{radios}</fieldset>
<label class="upload">Sube imagen de producto para inspección
<input type="file" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required></label>
<button type="submit">Ejecutar Inspección IA</button>
</form>
{result}
</section>"#,
        intro = notice(
            Tone::Info,
            "Simulación: Sube una foto de un producto. El sistema 'escaneará' buscando anomalías."
        ),
    )
}

fn report_html(report: &InspectionReport) -> String {
    let verdict = match report.verdict {
        Verdict::Defect => notice(Tone::Error, report.verdict.message()),
        Verdict::Pass => notice(Tone::Success, report.verdict.message()),
    };
    format!(
        r#"<div class="split split--even vision-result">
<figure><img src="{original}" alt="Imagen Original"><figcaption>Imagen Original ({w}×{h})</figcaption></figure>
<figure><img src="{annotated}" alt="{caption}"><figcaption>{caption}</figcaption></figure>
</div>
{verdict}"#,
        original = report.original_data_url,
        annotated = report.annotated_data_url,
        w = report.width,
        h = report.height,
        caption = report.verdict.caption(),
    )
}

fn design_panel(variant_requested: bool) -> String {
    let placeholder = if variant_requested {
        format!(
            "{}<p class=\"placeholder\"><em>[Aquí aparecería la imagen generada por IA con el nuevo estilo]</em></p>",
            notice(
                Tone::Warning,
                "⚠️ Nota: Esta función requiere conectar Stable Diffusion API. (Placeholder visual)"
            )
        )
    } else {
        String::new()
    };
    format!(
        r#"<section class="tab-panel">
<h3>Prototipado Rápido con IA</h3>
{intro}
<form method="get" action="/vision">
<input type="hidden" name="tab" value="design">
<input type="hidden" name="variant" value="dark">
<button type="submit">Generar Variante (Madera Oscura)</button>
</form>
{placeholder}
</section>"#,
        intro = notice(
            Tone::Info,
            "Simulación: Visualiza cómo quedaría un producto con otro material sin fabricarlo."
        ),
    )
}
