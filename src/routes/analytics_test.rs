use super::*;

use axum::http::{HeaderMap, HeaderValue, header};
use uuid::Uuid;

use crate::state::test_helpers::{self, response_text};

/// A jar as the extractor builds it from a request's `Cookie` header.
fn jar_for(id: Uuid) -> CookieJar {
    let mut headers = HeaderMap::new();
    let cookie = format!("{}={id}", session::COOKIE_NAME);
    headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
    CookieJar::from_headers(&headers)
}

fn query(material: Option<&str>) -> Query<FilterQuery> {
    Query(FilterQuery { material: material.map(str::to_string) })
}

#[tokio::test]
async fn dashboard_renders_all_materials_by_default() {
    let state = test_helpers::test_app_state();

    let response = page(State(state), CookieJar::new(), query(None)).await.into_response();
    let (status, body) = response_text(response).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("3,935 u"));
    assert!(body.contains(">Jul<"));
    assert!(body.contains("Tendencia de Ventas vs. Proyección IA (Todos)"));
    assert!(body.contains(r#"<option value="Todos" selected>"#));
    assert!(body.contains("He analizado los datos del gráfico"));
}

#[tokio::test]
async fn dashboard_applies_material_filter() {
    let state = test_helpers::test_app_state();

    let (_, body) = response_text(page(State(state), CookieJar::new(), query(Some("Pino"))).await.into_response()).await;

    assert!(body.contains("1,570 u"));
    assert!(body.contains("96.4%"));
    assert!(body.contains(r#"<option value="Pino" selected>"#));
    assert!(body.contains(r#"href="/analytics/data.csv?material=Pino""#));
}

#[tokio::test]
async fn unknown_material_falls_back_to_all() {
    let state = test_helpers::test_app_state();

    let (_, body) = response_text(page(State(state), CookieJar::new(), query(Some("Caoba"))).await.into_response()).await;

    assert!(body.contains("3,935 u"));
}

#[tokio::test]
async fn csv_download_is_an_attachment() {
    let response = download_csv(query(Some("Cedro"))).await;

    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(response.headers()[header::CONTENT_DISPOSITION], "attachment; filename=\"ventas_cedro.csv\"");
    let (status, body) = response_text(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Mes,Material,Ventas Reales,Ventas Predichas\n"));
    assert_eq!(body.lines().count(), 13);
}

#[tokio::test]
async fn chat_submit_appends_one_exchange_and_keeps_filter() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();
    let form = AnalystForm { prompt: "¿Qué madera se vendió más?".into(), material: Some("Roble".into()) };

    let response = submit(State(state.clone()), jar_for(id), Form(form)).await.into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/analytics?material=Roble");
    assert_eq!(state.sessions.transcript(id, Channel::Analyst).await.len(), 3);
    assert_eq!(state.sessions.transcript(id, Channel::Assistant).await.len(), 1);
}

#[tokio::test]
async fn chat_reset_clears_analyst_only() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();
    let form = AnalystForm { prompt: "total".into(), material: None };
    submit(State(state.clone()), jar_for(id), Form(form)).await;

    let response = reset(State(state.clone()), jar_for(id), Form(ResetForm { material: None }))
        .await
        .into_response();

    assert_eq!(response.headers()[header::LOCATION], "/analytics?material=Todos");
    assert_eq!(state.sessions.transcript(id, Channel::Analyst).await.len(), 1);
}
