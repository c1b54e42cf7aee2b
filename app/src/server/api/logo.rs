//! Logo API:
//!   GET    /api/logo       – logo status
//!   POST   /api/logo       – upload (multipart `logo` field, or JSON `{"data_url": ...}`)
//!   DELETE /api/logo       – remove the logo
//!   PUT    /api/logo/shape – select the logo shape

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use qr_engine::LogoShape;
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;

use super::{ApiResult, err_json, generation_error};

/// Maximum accepted logo upload.
pub const MAX_LOGO_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Deserialize)]
pub struct DataUrlBody {
    pub data_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ShapeBody {
    pub shape: LogoShape,
}

/// GET /api/logo
pub async fn get_logo(State(state): State<SharedState>) -> ApiResult {
    let view = state.logo().await.view();
    Ok(Json(json!({ "logo": view })))
}

/// POST /api/logo
///
/// A logo that fails to decode is dropped and the card regenerates without one.
pub async fn upload_logo(State(state): State<SharedState>, req: Request) -> ApiResult {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let result = if is_multipart {
        let mut multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| err_json(400, &e.to_string()))?;
        let mut data = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| err_json(400, &e.to_string()))?
        {
            if field.name() == Some("logo") {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                data = Some(bytes);
                break;
            }
        }
        let bytes = data.ok_or_else(|| err_json(400, "No logo file provided"))?;
        if bytes.len() > MAX_LOGO_SIZE {
            return Err(err_json(413, "Logo file too large (max 10MB)"));
        }
        state.logo().await.set_from_bytes(&bytes)
    } else {
        let Json(body) = Json::<DataUrlBody>::from_request(req, &state)
            .await
            .map_err(|e| err_json(400, &e.body_text()))?;
        match qr_engine::data_url_bytes(&body.data_url) {
            Ok(bytes) if bytes.len() > MAX_LOGO_SIZE => {
                return Err(err_json(413, "Logo file too large (max 10MB)"));
            }
            Ok(bytes) => state.logo().await.set_from_bytes(&bytes),
            // Malformed URL: drop the logo and report why
            Err(_) => state.logo().await.set_from_data_url(&body.data_url),
        }
    };

    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;

    match result {
        Ok(()) => Ok(Json(json!({ "success": true, "logo": state.logo().await.view() }))),
        Err(e) => Err(err_json(422, &e.to_string())),
    }
}

/// DELETE /api/logo
pub async fn delete_logo(State(state): State<SharedState>) -> ApiResult {
    state.logo().await.clear();
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok(Json(json!({ "success": true, "message": "Logo removed" })))
}

/// PUT /api/logo/shape
pub async fn update_shape(
    State(state): State<SharedState>,
    Json(body): Json<ShapeBody>,
) -> ApiResult {
    let view = {
        let mut logo = state.logo().await;
        logo.set_shape(body.shape);
        logo.view()
    };
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok(Json(json!({ "success": true, "logo": view })))
}
