use super::*;
use crate::services::analytics::{Material, MaterialFilter, filter_rows, monthly_series};

#[test]
fn nice_step_picks_one_two_five() {
    assert_eq!(nice_step(0), 1);
    assert_eq!(nice_step(4), 1);
    assert_eq!(nice_step(9), 2);
    assert_eq!(nice_step(165), 50);
    assert_eq!(nice_step(385), 100);
    assert_eq!(nice_step(1000), 200);
}

#[test]
fn chart_has_two_series_with_twelve_points() {
    let points = monthly_series(&filter_rows(MaterialFilter::All));
    let svg = line_chart(&points, "Tendencia");

    assert_eq!(svg.matches("<polyline").count(), 2);
    assert_eq!(svg.matches("<circle").count(), 24);
    assert!(svg.contains(ACTUAL_COLOR));
    assert!(svg.contains(PREDICTED_COLOR));
    assert!(svg.contains(">Dic</text>"));
}

#[test]
fn chart_scales_points_into_plot_area() {
    let points = monthly_series(&filter_rows(MaterialFilter::Only(Material::Pino)));
    let svg = line_chart(&points, "Pino");

    // max 165 -> step 50, top 200; Ene actual 100 sits halfway down the plot.
    assert!(svg.contains(r##"data-series="Ventas Reales" fill="none" stroke="#00eeff" stroke-width="3" points="64.0,172.0 "##));
    assert!(svg.contains(">200</text>"));
    assert!(!svg.contains(">250</text>"));
}

#[test]
fn chart_escapes_title() {
    let svg = line_chart(&[], "<b>x</b>");
    assert!(svg.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(!svg.contains("<b>"));
}

#[test]
fn empty_chart_still_renders() {
    let svg = line_chart(&[], "vacío");
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}
