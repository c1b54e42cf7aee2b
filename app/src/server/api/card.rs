//! Generation and export API:
//!   POST /api/generate           – request a (debounced) regeneration
//!   GET  /api/preview            – latest card as PNG
//!   GET  /api/download/{format}  – latest card as a PNG/JPEG attachment
//!   GET  /api/scan-instruction   – "how to scan" illustration as PNG

use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use image::RgbaImage;
use qr_canvas::{ExportFormat, download_filename, encode};
use serde_json::json;

use crate::app::SharedState;
use crate::services::generator::GeneratedCard;

use super::{ApiError, err_json, generation_error};

/// POST /api/generate
pub async fn generate(State(state): State<SharedState>) -> Result<Response, ApiError> {
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "success": true, "message": "Generation scheduled" })),
    )
        .into_response())
}

/// GET /api/preview
pub async fn preview(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let card = latest(&state)?;
    let bytes = encode_card(&card, ExportFormat::Png).await?;
    Response::builder()
        .header(header::CONTENT_TYPE, ExportFormat::Png.mime_type())
        .header(header::CACHE_CONTROL, "no-store")
        .header("X-Background", card.background_css.as_str())
        .body(Body::from(bytes))
        .map_err(|e| err_json(500, &e.to_string()))
}

/// GET /api/download/{format}
pub async fn download(
    State(state): State<SharedState>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse().map_err(|e: qr_canvas::CanvasError| {
        err_json(400, &e.to_string())
    })?;
    let card = latest(&state)?;
    let bytes = encode_card(&card, format).await?;
    let filename = download_filename(&card.title, format);

    tracing::info!(filename = %filename, bytes = bytes.len(), "Serving download");
    Response::builder()
        .header(header::CONTENT_TYPE, format.mime_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .map_err(|e| err_json(500, &e.to_string()))
}

/// GET /api/scan-instruction
pub async fn scan_instruction(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let bytes = encode_image(state.scan_instruction(), ExportFormat::Png).await?;
    Response::builder()
        .header(header::CONTENT_TYPE, ExportFormat::Png.mime_type())
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(bytes))
        .map_err(|e| err_json(500, &e.to_string()))
}

fn latest(state: &SharedState) -> Result<Arc<GeneratedCard>, ApiError> {
    state
        .latest_card()
        .ok_or_else(|| err_json(409, "QR bitmap is not available yet"))
}

async fn encode_card(card: &GeneratedCard, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
    encode_image(Arc::clone(&card.image), format).await
}

async fn encode_image(image: Arc<RgbaImage>, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
    tokio::task::spawn_blocking(move || encode(&image, format))
        .await
        .map_err(|e| err_json(500, &e.to_string()))?
        .map_err(|e| {
            tracing::error!(error = %e, "Export failed");
            err_json(500, &e.to_string())
        })
}
