//! Form API:
//!   GET /api/form – current form values
//!   PUT /api/form – patch form values and schedule a regeneration

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::app::SharedState;
use crate::services::form::FormPatch;

use super::{ApiResult, form_error, generation_error};

/// GET /api/form
pub async fn get_form(State(state): State<SharedState>) -> ApiResult {
    Ok(Json(json!({ "form": state.form().await })))
}

/// PUT /api/form
pub async fn update_form(
    State(state): State<SharedState>,
    Json(patch): Json<FormPatch>,
) -> ApiResult {
    let form = state.update_form(patch).await.map_err(|e| form_error(&e))?;
    state
        .request_generation()
        .await
        .map_err(|e| generation_error(&e))?;
    Ok(Json(json!({ "success": true, "form": form })))
}
