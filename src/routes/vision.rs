//! Vision routes: `GET /vision` and the multipart `POST /vision/inspect`.

use axum::extract::{Multipart, Query, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

use super::page_html;
use crate::error::ErrorCode;
use crate::render::vision::{Tab, VisionView};
use crate::render::{self, Page};
use crate::services::vision::{self, InspectionMode, VisionError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct VisionQuery {
    pub tab: Option<String>,
    pub variant: Option<String>,
}

/// `GET /vision?tab=design&variant=dark`
pub async fn page(Query(query): Query<VisionQuery>) -> Response {
    let tab = match query.tab.as_deref() {
        Some("design") => Tab::Design,
        _ => Tab::Inspection,
    };
    let view = VisionView {
        tab,
        variant_requested: tab == Tab::Design && query.variant.is_some(),
        ..VisionView::default()
    };
    page_html(Page::Vision, &render::vision::render(&view)).into_response()
}

/// `POST /vision/inspect`: multipart fields `mode` and `image`.
///
/// The result, or the reason there is none, is rendered inline.
pub async fn inspect(State(state): State<AppState>, multipart: Multipart) -> Response {
    let limit = state.config.vision_max_upload_bytes;
    let (mode, upload) = read_upload(multipart, limit).await;

    let outcome = match upload {
        Ok(bytes) => tokio::task::spawn_blocking(move || vision::inspect(&bytes, limit, mode, &mut rand::rng()))
            .await
            .unwrap_or_else(|e| Err(VisionError::Upload(e.to_string()))),
        Err(e) => Err(e),
    };

    let status = match &outcome {
        Ok(report) => {
            info!(
                mode = mode.as_str(),
                verdict = ?report.verdict,
                width = report.width,
                height = report.height,
                "vision: inspection completed"
            );
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "vision: inspection rejected");
            status_for(e)
        }
    };

    let view = VisionView { tab: Tab::Inspection, mode, outcome: Some(outcome), variant_requested: false };
    (status, page_html(Page::Vision, &render::vision::render(&view))).into_response()
}

fn status_for(error: &VisionError) -> StatusCode {
    match error {
        VisionError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        VisionError::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        VisionError::MissingImage | VisionError::Decode(_) | VisionError::Upload(_) => StatusCode::BAD_REQUEST,
        VisionError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Collect the mode and image bytes. Fields may arrive in any order.
async fn read_upload(mut multipart: Multipart, limit: usize) -> (InspectionMode, Result<Vec<u8>, VisionError>) {
    let mut mode = InspectionMode::default();
    let mut image = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (mode, Err(upload_error(&e, limit))),
        };
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("mode") => match field.text().await {
                Ok(raw) => mode = InspectionMode::parse(&raw),
                Err(e) => return (mode, Err(upload_error(&e, limit))),
            },
            Some("image") => match field.bytes().await {
                Ok(bytes) => image = bytes.to_vec(),
                Err(e) => return (mode, Err(upload_error(&e, limit))),
            },
            _ => {}
        }
    }
    (mode, Ok(image))
}

fn upload_error(error: &MultipartError, limit: usize) -> VisionError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        VisionError::TooLarge { limit }
    } else {
        VisionError::Upload(error.body_text())
    }
}

#[cfg(test)]
#[path = "vision_test.rs"]
mod tests;
