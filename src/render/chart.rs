//! Inline SVG line chart for the analytics dashboard.
//!
//! Two series (actual and predicted) over the twelve months, with horizontal
//! grid lines at a "nice" step and per-point hover titles.

use std::fmt::Write as _;

use super::escape_html;
use crate::services::analytics::MonthlyPoint;

pub const ACTUAL_COLOR: &str = "#00eeff";
pub const PREDICTED_COLOR: &str = "#bd00ff";

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 64.0;
const TARGET_TICKS: u32 = 5;

/// Smallest 1/2/5 × 10^k step that splits `max` into at most [`TARGET_TICKS`] bands.
#[must_use]
pub fn nice_step(max: u32) -> u32 {
    let raw = max.div_ceil(TARGET_TICKS).max(1);
    let mut magnitude = 1u32;
    loop {
        for factor in [1, 2, 5] {
            let step = factor * magnitude;
            if step >= raw {
                return step;
            }
        }
        magnitude = magnitude.saturating_mul(10);
    }
}

struct Frame {
    y_top: u32,
    count: usize,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    #[allow(clippy::cast_precision_loss)]
    fn x(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return MARGIN_LEFT + Self::plot_width() / 2.0;
        }
        MARGIN_LEFT + Self::plot_width() * index as f64 / (self.count - 1) as f64
    }

    fn y(&self, value: u32) -> f64 {
        MARGIN_TOP + Self::plot_height() * (1.0 - f64::from(value) / f64::from(self.y_top))
    }
}

/// Render the chart. `title` is escaped.
#[must_use]
pub fn line_chart(points: &[MonthlyPoint], title: &str) -> String {
    let max = points
        .iter()
        .map(|p| p.actual.max(p.predicted))
        .max()
        .unwrap_or(0);
    let step = nice_step(max);
    let frame = Frame { y_top: max.div_ceil(step).max(1).saturating_mul(step), count: points.len() };

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{title}" xmlns="http://www.w3.org/2000/svg">
<text class="chart-title" x="{MARGIN_LEFT}" y="24">{title}</text>
"#,
        title = escape_html(title),
    );

    // Grid and y labels.
    for tick in (0..=frame.y_top).step_by(usize::try_from(step).unwrap_or(1)) {
        let y = frame.y(tick);
        let _ = writeln!(
            svg,
            r#"<line class="grid" x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}"/><text class="axis-label" x="{lx}" y="{ty:.1}" text-anchor="end">{tick}</text>"#,
            x2 = WIDTH - MARGIN_RIGHT,
            lx = MARGIN_LEFT - 8.0,
            ty = y + 4.0,
        );
    }

    // X labels.
    for (i, p) in points.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text class="axis-label" x="{x:.1}" y="{y}" text-anchor="middle">{month}</text>"#,
            x = frame.x(i),
            y = HEIGHT - MARGIN_BOTTOM + 20.0,
            month = p.month,
        );
    }

    write_series(&mut svg, &frame, points, "Ventas Reales", ACTUAL_COLOR, |p| p.actual);
    write_series(&mut svg, &frame, points, "Ventas Predichas", PREDICTED_COLOR, |p| p.predicted);

    let _ = write!(
        svg,
        r#"<text class="axis-title" x="{cx:.1}" y="{by}" text-anchor="middle">Ciclo Anual 2024-2025</text>
<text class="axis-title" x="16" y="{cy:.1}" text-anchor="middle" transform="rotate(-90 16 {cy:.1})">Unidades Vendidas</text>
<g class="legend"><rect x="{lx}" y="12" width="12" height="12" fill="{ACTUAL_COLOR}"/><text x="{lx1}" y="22">Ventas Reales</text><rect x="{lx2}" y="12" width="12" height="12" fill="{PREDICTED_COLOR}"/><text x="{lx3}" y="22">Ventas Predichas</text></g>
</svg>"#,
        cx = MARGIN_LEFT + Frame::plot_width() / 2.0,
        by = HEIGHT - 12.0,
        cy = MARGIN_TOP + Frame::plot_height() / 2.0,
        lx = WIDTH - 290.0,
        lx1 = WIDTH - 272.0,
        lx2 = WIDTH - 150.0,
        lx3 = WIDTH - 132.0,
    );
    svg
}

fn write_series(
    svg: &mut String,
    frame: &Frame,
    points: &[MonthlyPoint],
    name: &str,
    color: &str,
    value: impl Fn(&MonthlyPoint) -> u32,
) {
    let coords: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.1},{:.1}", frame.x(i), frame.y(value(p))))
        .collect();
    let _ = writeln!(
        svg,
        r#"<polyline class="series" data-series="{name}" fill="none" stroke="{color}" stroke-width="3" points="{}"/>"#,
        coords.join(" ")
    );
    for (i, p) in points.iter().enumerate() {
        let v = value(p);
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{color}"><title>{} · {name}: {v}</title></circle>"#,
            frame.x(i),
            frame.y(v),
            p.month,
        );
    }
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
