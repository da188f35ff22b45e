use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use serde_json::json;

use super::render::{render_page, PageView};
use super::AppState;
use crate::classifier::ClassifierError;
use crate::pipeline::Analysis;

/// Multipart field carrying the uploaded image.
pub const UPLOAD_FIELD: &str = "file";

fn status_for(err: &ClassifierError) -> StatusCode {
    match err {
        ClassifierError::ImageDecodeError(_) | ClassifierError::ValidationError(_) => StatusCode::BAD_REQUEST,
        ClassifierError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        ClassifierError::InferenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn upload_error(context: &str, err: MultipartError) -> ClassifierError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ClassifierError::PayloadTooLarge(err.body_text())
    } else {
        ClassifierError::ValidationError(format!("{}: {}", context, err.body_text()))
    }
}

/// Pulls the upload out of the form. `Ok(None)` means no file was chosen.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ClassifierError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Malformed upload", e))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| upload_error("Failed to read upload", e))?;
            return Ok(if bytes.is_empty() { None } else { Some(bytes.to_vec()) });
        }
    }
    Ok(None)
}

/// Runs the pipeline off the async reactor.
async fn run_analysis(state: &AppState, bytes: Arc<Vec<u8>>) -> Result<Analysis, ClassifierError> {
    let context = Arc::clone(&state.context);
    tokio::task::spawn_blocking(move || context.analyze(&bytes))
        .await
        .map_err(|e| {
            error!("Analysis task failed: {}", e);
            ClassifierError::InferenceError(format!("Analysis task failed: {}", e))
        })?
}

pub async fn index() -> Html<String> {
    Html(render_page(&PageView::AwaitingUpload { notice: None }))
}

pub async fn analyze_page(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let bytes = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => Arc::new(bytes),
        Ok(None) => return index().await.into_response(),
        Err(e) => return error_page(&e),
    };
    info!("Received upload of {} bytes", bytes.len());

    match run_analysis(&state, Arc::clone(&bytes)).await {
        Ok(analysis) => Html(render_page(&PageView::ResultShown {
            analysis: &analysis,
            image_bytes: &bytes,
        }))
        .into_response(),
        Err(e) => error_page(&e),
    }
}

fn error_page(err: &ClassifierError) -> Response {
    warn!("Request failed: {}", err);
    let notice = err.to_string();
    (
        status_for(err),
        Html(render_page(&PageView::AwaitingUpload { notice: Some(&notice) })),
    )
        .into_response()
}

pub async fn api_predict(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let bytes = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => Arc::new(bytes),
        Ok(None) => {
            return error_json(&ClassifierError::ValidationError("No file uploaded".into()));
        }
        Err(e) => return error_json(&e),
    };

    match run_analysis(&state, bytes).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => error_json(&e),
    }
}

fn error_json(err: &ClassifierError) -> Response {
    warn!("API request failed: {}", err);
    (status_for(err), Json(json!({ "error": err.to_string() }))).into_response()
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "classes": state.context.labels().len(),
    }))
}
