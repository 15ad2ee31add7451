//! Contact routes: `GET /contact` and `GET /contact/cv`.

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use super::page_html;
use crate::error::ErrorCode;
use crate::render::contact::ContactView;
use crate::render::{self, Page};
use crate::services::contact::{self, CV_FILE_NAME, ContactError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub msg: String,
}

fn render_page(query: &ContactQuery, cv_error: Option<String>) -> String {
    let links = contact::message_links(&query.name, &query.msg);
    render::contact::render(&ContactView { name: &query.name, msg: &query.msg, links: &links, cv_error })
}

/// `GET /contact?name=&msg=`: contact data, CV button and message links.
pub async fn page(State(state): State<AppState>, Query(query): Query<ContactQuery>) -> Response {
    let cv_path = &state.config.cv_path;
    let cv_error = if contact::cv_available(cv_path).await {
        None
    } else {
        Some(ContactError::CvNotFound(cv_path.clone()).to_string())
    };
    page_html(Page::Contact, &render_page(&query, cv_error)).into_response()
}

/// `GET /contact/cv`: the PDF as an attachment, or the contact page with the error.
pub async fn download_cv(State(state): State<AppState>) -> Response {
    match contact::load_cv(&state.config.cv_path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{CV_FILE_NAME}\"")),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "contact: cv unavailable");
            let status = match &e {
                ContactError::CvNotFound(_) => StatusCode::NOT_FOUND,
                ContactError::CvRead { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let body = render_page(&ContactQuery::default(), Some(e.to_string()));
            (status, page_html(Page::Contact, &body)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
