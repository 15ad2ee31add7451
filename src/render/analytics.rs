//! Analytics dashboard page.

use std::fmt::Write as _;

use super::{chart, chat_form, chat_log, escape_html, expander, page_header};
use crate::llm::types::Message;
use crate::services::analytics::{Kpis, MaterialFilter, MonthlyPoint, format_thousands};

const ABOUT: &str = r#"<p><strong>1. El Problema Real:</strong> Las empresas suelen mirar "al retrovisor" (lo que ya vendieron). El problema es que saber que vendiste mucho Pino en Enero no te ayuda a saber cuánto comprar para Febrero si el mercado cambia.</p>
<p><strong>2. La Solución (Predicción IA):</strong> Utilizamos algoritmos de <em>Machine Learning</em> (como Prophet o ARIMA) que analizan años de historial para detectar <strong>patrones estacionales</strong> y <strong>tendencias ocultas</strong>.</p>
<ul><li><em>Ejemplo:</em> "El modelo detectó que cada Mayo sube la demanda de Cedro un 15%, por lo que sugiere aumentar stock hoy para no perder ventas mañana."</li></ul>
<p><strong>3. Fuente de Datos (Simulación):</strong> En un entorno real, este tablero se conecta en tiempo real a tu <strong>ERP (SAP, Oracle)</strong> o Base de Datos <strong>SQL</strong>. Aquí simulamos una extracción segura de esos datos transaccionales.</p>"#;

pub struct AnalyticsView<'a> {
    pub filter: MaterialFilter,
    pub kpis: Option<&'a Kpis>,
    pub series: &'a [MonthlyPoint],
    pub turns: &'a [Message],
}

#[must_use]
pub fn render(view: &AnalyticsView<'_>) -> String {
    let label = view.filter.label();

    let mut options = String::new();
    for option in MaterialFilter::OPTIONS {
        let selected = if option == view.filter { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{0}"{selected}>{0}</option>"#, option.label());
    }

    let metrics = view.kpis.map_or_else(
        || r#"<p class="muted">Sin datos para este filtro.</p>"#.to_string(),
        kpi_cards,
    );

    format!(
        r#"{header}
{about}
<hr>
<section class="split split--filters">
<form class="filter" method="get" action="/analytics">
<h5>Configuración de Vista</h5>
<label>Seleccionar Material:
<select name="material" data-autosubmit>{options}</select></label>
<noscript><button type="submit">Aplicar</button></noscript>
<p class="caption">Filtra los datos del gráfico y del chat de análisis.</p>
<a class="button-ghost" href="/analytics/data.csv?material={label}" download>Descargar CSV</a>
</form>
<div class="kpis">{metrics}</div>
</section>
<section class="card chart-card">{chart}</section>
<hr>
<h3>Analista de Datos IA (Chat con tu Tabla)</h3>
<p class="caption">Pregunta directamente sobre los datos mostrados arriba. La IA tiene acceso a las filas exactas.</p>
<div class="chat-panel">
{log}
{form}
</div>"#,
        header = page_header(
            "Business Intelligence & Predicción",
            "Tableros Interactivos para Toma de Decisiones Estratégicas"
        ),
        about = expander("¿Por qué usar Predicción con IA y de dónde salen los datos?", ABOUT),
        chart = chart::line_chart(view.series, &format!("Tendencia de Ventas vs. Proyección IA ({label})")),
        log = chat_log(view.turns, "📊"),
        form = chat_form(
            "/analytics/chat",
            "/analytics/chat/reset",
            "Pregunta sobre los datos...",
            &[("material", label)]
        ),
    )
}

fn kpi_cards(kpis: &Kpis) -> String {
    format!(
        r#"<div class="metric"><span class="metric-label">Ventas Totales (Periodo)</span><span class="metric-value">{total} u</span><span class="metric-delta">Acumulado</span></div>
<div class="metric"><span class="metric-label">Precisión del Modelo IA</span><span class="metric-value">{accuracy:.1}%</span><span class="metric-delta">Alta Confianza</span></div>
<div class="metric"><span class="metric-label">Mes Pico de Venta</span><span class="metric-value">{peak}</span><span class="metric-delta metric-delta--off">Estacionalidad</span></div>"#,
        total = format_thousands(kpis.total_sales),
        accuracy = kpis.accuracy_pct,
        peak = escape_html(kpis.peak_month),
    )
}
