//! REST API handlers grouped by domain.

pub mod card;
pub mod form;
pub mod gradient;
pub mod logo;
pub mod presets;
pub mod settings;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::services::form::FormError;
use crate::services::generator::GenerationError;

pub type ApiError = (StatusCode, Json<Value>);
pub type ApiResult = Result<Json<Value>, ApiError>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

pub fn form_error(e: &FormError) -> ApiError {
    match e {
        FormError::UnknownPreset(_) => err_json(404, &e.to_string()),
        _ => err_json(400, &e.to_string()),
    }
}

pub fn generation_error(e: &GenerationError) -> ApiError {
    match e {
        GenerationError::Form(inner) => form_error(inner),
        GenerationError::SchedulerStopped => err_json(503, &e.to_string()),
        _ => err_json(500, &e.to_string()),
    }
}
