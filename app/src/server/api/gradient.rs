//! Background gradient API.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;

use super::{ApiResult, form_error, generation_error};

#[derive(Debug, Deserialize)]
pub struct CustomGradientBody {
    pub enabled: bool,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/gradient
pub async fn get_gradient(State(state): State<SharedState>) -> ApiResult {
    let view = state.gradient().await.view();
    Ok(Json(json!({ "gradient": view })))
}

/// POST /api/gradient/preset/{index} – select a preset (turns custom off)
pub async fn select_preset(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> ApiResult {
    let view = {
        let mut gradient = state.gradient().await;
        gradient.select_preset(index).map_err(|e| form_error(&e))?;
        gradient.view()
    };
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok(Json(json!({ "success": true, "gradient": view })))
}

/// PUT /api/gradient/custom – toggle the custom two-color gradient
pub async fn update_custom(
    State(state): State<SharedState>,
    Json(body): Json<CustomGradientBody>,
) -> ApiResult {
    let view = {
        let mut gradient = state.gradient().await;
        gradient
            .set_custom(body.enabled, body.start.as_deref(), body.end.as_deref())
            .map_err(|e| form_error(&e))?;
        gradient.view()
    };
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok(Json(json!({ "success": true, "gradient": view })))
}
