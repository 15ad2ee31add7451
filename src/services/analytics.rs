//! Analytics service: mock sales dataset, KPIs and the data-analyst chat.
//!
//! DESIGN
//! ======
//! The dataset is a fixed table of 12 months × 3 materials with an actual and
//! a "predicted" series. No model produces the forecast. The KPIs, the chart
//! series and the CSV context handed to the analyst chat are all derived from
//! the rows that survive the material filter.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::llm::types::{ChatOptions, Message};
use crate::services::chat;
use crate::services::session::Channel;
use crate::state::AppState;

pub const GREETING: &str = "Hola. He analizado los datos del gráfico. ¿Qué quieres saber? \
(Ej: '¿Qué madera se vendió más?', '¿Cuál es la tendencia del Pino?')";

pub const CHAT_OPTIONS: ChatOptions = ChatOptions { max_tokens: 600, temperature: 0.1 };

const DEMO_REPLY: &str = "⚠️ **Modo Demo**: Para chatear con tus datos reales, configura la API Key. \n\n\
*Respuesta simulada:* El Pino tuvo su pico de ventas en Julio con 160 unidades.";

pub const MONTHS: [&str; 12] = ["Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic"];

const PINO_ACTUAL: [u32; 12] = [100, 120, 115, 130, 140, 150, 160, 155, 140, 130, 120, 110];
const PINO_PREDICTED: [u32; 12] = [105, 118, 120, 135, 145, 155, 165, 160, 145, 135, 125, 115];
const ROBLE_ACTUAL: [u32; 12] = [80, 85, 90, 95, 110, 115, 120, 125, 130, 125, 110, 100];
const ROBLE_PREDICTED: [u32; 12] = [82, 88, 92, 98, 115, 120, 125, 130, 135, 130, 115, 105];
const CEDRO_ACTUAL: [u32; 12] = [60, 65, 70, 75, 80, 85, 90, 95, 100, 110, 120, 130];
const CEDRO_PREDICTED: [u32; 12] = [62, 68, 72, 78, 85, 90, 95, 100, 108, 118, 128, 138];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Flush(String),
}

impl crate::error::ErrorCode for AnalyticsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Csv(_) => "E_CSV_ENCODE",
            Self::Flush(_) => "E_CSV_FLUSH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Material {
    Pino,
    Roble,
    Cedro,
}

impl Material {
    pub const ALL: [Self; 3] = [Self::Pino, Self::Roble, Self::Cedro];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pino => "Pino",
            Self::Roble => "Roble",
            Self::Cedro => "Cedro",
        }
    }

    fn series(self) -> (&'static [u32; 12], &'static [u32; 12]) {
        match self {
            Self::Pino => (&PINO_ACTUAL, &PINO_PREDICTED),
            Self::Roble => (&ROBLE_ACTUAL, &ROBLE_PREDICTED),
            Self::Cedro => (&CEDRO_ACTUAL, &CEDRO_PREDICTED),
        }
    }
}

/// Dashboard filter: every material or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialFilter {
    #[default]
    All,
    Only(Material),
}

impl MaterialFilter {
    pub const OPTIONS: [Self; 4] = [
        Self::All,
        Self::Only(Material::Pino),
        Self::Only(Material::Roble),
        Self::Only(Material::Cedro),
    ];

    /// Parse a `?material=` value. Unknown or absent values select all.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::All;
        };
        Material::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
            .map_or(Self::All, Self::Only)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Only(m) => m.as_str(),
        }
    }

    fn admits(self, material: Material) -> bool {
        match self {
            Self::All => true,
            Self::Only(m) => m == material,
        }
    }
}

/// One dataset row. Field names are the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesRow {
    #[serde(rename = "Mes")]
    pub month: &'static str,
    #[serde(rename = "Material")]
    pub material: Material,
    #[serde(rename = "Ventas Reales")]
    pub actual: u32,
    #[serde(rename = "Ventas Predichas")]
    pub predicted: u32,
}

/// Headline numbers for the filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_sales: u64,
    /// `100 - mean(|actual - predicted|) / mean(actual) * 100`.
    pub accuracy_pct: f64,
    pub peak_month: &'static str,
}

/// One x-axis point of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub actual: u32,
    pub predicted: u32,
}

// =============================================================================
// DATASET
// =============================================================================

/// All 36 rows in material-major order.
#[must_use]
pub fn dataset() -> Vec<SalesRow> {
    Material::ALL
        .into_iter()
        .flat_map(|material| {
            let (actual, predicted) = material.series();
            MONTHS
                .iter()
                .zip(actual.iter().zip(predicted.iter()))
                .map(move |(&month, (&actual, &predicted))| SalesRow { month, material, actual, predicted })
        })
        .collect()
}

#[must_use]
pub fn filter_rows(filter: MaterialFilter) -> Vec<SalesRow> {
    dataset()
        .into_iter()
        .filter(|row| filter.admits(row.material))
        .collect()
}

/// Compute the KPIs. Returns `None` for an empty row set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_kpis(rows: &[SalesRow]) -> Option<Kpis> {
    // First row wins ties, like an argmax scan.
    let peak = rows
        .iter()
        .fold(None::<&SalesRow>, |best, row| match best {
            Some(b) if b.actual >= row.actual => Some(b),
            _ => Some(row),
        })?;

    let n = rows.len() as f64;
    let total_sales: u64 = rows.iter().map(|r| u64::from(r.actual)).sum();
    let mean_actual = total_sales as f64 / n;
    let mean_abs_err = rows
        .iter()
        .map(|r| f64::from(r.actual.abs_diff(r.predicted)))
        .sum::<f64>()
        / n;
    let accuracy_pct = if mean_actual > 0.0 { 100.0 - mean_abs_err / mean_actual * 100.0 } else { 0.0 };

    Some(Kpis { total_sales, accuracy_pct, peak_month: peak.month })
}

/// Per-month series for the chart. Materials are summed when several are shown.
#[must_use]
pub fn monthly_series(rows: &[SalesRow]) -> Vec<MonthlyPoint> {
    MONTHS
        .iter()
        .map(|&month| {
            let (actual, predicted) = rows
                .iter()
                .filter(|r| r.month == month)
                .fold((0, 0), |(a, p), r| (a + r.actual, p + r.predicted));
            MonthlyPoint { month, actual, predicted }
        })
        .collect()
}

/// Encode rows as CSV with a header line.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn to_csv(rows: &[SalesRow]) -> Result<String, AnalyticsError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyticsError::Flush(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AnalyticsError::Flush(e.to_string()))
}

/// Format an integer with `,` thousands separators.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// ANALYST CHAT
// =============================================================================

#[must_use]
pub fn build_system_prompt(csv: &str) -> String {
    format!(
        "Eres un Analista de Datos Experto. Tienes acceso al siguiente dataset (formato CSV) que corresponde a las \
         ventas de madera:\n\n{csv}\n\nInstrucciones:\n1. Responde basándote ÚNICAMENTE en estos datos.\n2. Sé breve y \
         directo.\n3. Si te preguntan por totales, súmalos.\n4. Si te preguntan por tendencias, compara los meses."
    )
}

/// Handle one analyst chat submission against the filtered rows.
///
/// Appends exactly one user turn and one assistant turn, and returns the
/// assistant text. Blank prompts are ignored and return `None`.
pub async fn submit(state: &AppState, session_id: Uuid, filter: MaterialFilter, prompt: &str) -> Option<String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }
    info!(%session_id, material = filter.label(), prompt_len = prompt.len(), "analytics: prompt received");

    state
        .sessions
        .append(session_id, Channel::Analyst, Message::user(prompt))
        .await;

    let reply = match &state.llm {
        Some(llm) => match to_csv(&filter_rows(filter)) {
            Ok(csv) => {
                let system = build_system_prompt(&csv);
                chat::complete(state, llm, session_id, Channel::Analyst, &system, CHAT_OPTIONS)
                    .await
                    .unwrap_or_else(|e| format!("Error analizando datos: {e}"))
            }
            Err(e) => format!("Error analizando datos: {e}"),
        },
        None => DEMO_REPLY.to_string(),
    };

    state
        .sessions
        .append(session_id, Channel::Analyst, Message::assistant(reply.clone()))
        .await;
    Some(reply)
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
