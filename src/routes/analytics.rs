//! Analytics routes: dashboard, CSV export and the data-analyst chat.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use super::page_html;
use crate::error::ErrorCode;
use crate::render::analytics::AnalyticsView;
use crate::render::{self, Page};
use crate::services::analytics::{self, MaterialFilter};
use crate::services::session::{self, Channel};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub material: Option<String>,
}

impl FilterQuery {
    fn filter(&self) -> MaterialFilter {
        MaterialFilter::parse(self.material.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalystForm {
    #[serde(default)]
    pub prompt: String,
    pub material: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub material: Option<String>,
}

fn dashboard_url(filter: MaterialFilter) -> String {
    format!("{}?material={}", Page::Analytics.path(), filter.label())
}

/// `GET /analytics?material=`: KPIs, chart and analyst chat.
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<FilterQuery>,
) -> (CookieJar, Html<String>) {
    let (jar, session_id) = session::session_id(jar);
    let filter = query.filter();
    let rows = analytics::filter_rows(filter);
    let kpis = analytics::compute_kpis(&rows);
    let series = analytics::monthly_series(&rows);
    let turns = state.sessions.transcript(session_id, Channel::Analyst).await;

    let body = render::analytics::render(&AnalyticsView {
        filter,
        kpis: kpis.as_ref(),
        series: &series,
        turns: &turns,
    });
    (jar, page_html(Page::Analytics, &body))
}

/// `GET /analytics/data.csv?material=`: filtered rows as a CSV attachment.
pub async fn download_csv(Query(query): Query<FilterQuery>) -> Response {
    let filter = query.filter();
    match analytics::to_csv(&analytics::filter_rows(filter)) {
        Ok(csv) => {
            let disposition = format!("attachment; filename=\"ventas_{}.csv\"", filter.label().to_lowercase());
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "analytics: csv export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// `POST /analytics/chat`: ask the analyst about the filtered rows.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AnalystForm>,
) -> (CookieJar, Redirect) {
    let (jar, session_id) = session::session_id(jar);
    let filter = MaterialFilter::parse(form.material.as_deref());
    analytics::submit(&state, session_id, filter, &form.prompt).await;
    (jar, Redirect::to(&dashboard_url(filter)))
}

/// `POST /analytics/chat/reset`
pub async fn reset(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ResetForm>,
) -> (CookieJar, Redirect) {
    let (jar, session_id) = session::session_id(jar);
    state.sessions.reset(session_id, Channel::Analyst).await;
    info!(%session_id, "analytics: transcript reset");
    let filter = MaterialFilter::parse(form.material.as_deref());
    (jar, Redirect::to(&dashboard_url(filter)))
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
