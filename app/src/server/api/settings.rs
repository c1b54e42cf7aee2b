//! Settings management API:
//!   GET  /api/settings       – all settings with their effective values
//!   PUT  /api/settings       – update settings
//!   POST /api/settings/reset – drop runtime overrides

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::app::SharedState;

use super::{ApiError, ApiResult, err_json};

/// GET /api/settings
pub async fn get_settings(State(state): State<SharedState>) -> ApiResult {
    let all = state
        .settings()
        .get_all_settings()
        .map_err(|e| err_json(500, &format!("Failed to get settings: {e}")))?;
    Ok(Json(json!({ "settings": all })))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(body): Json<HashMap<String, String>>,
) -> ApiResult {
    let updated = state
        .settings()
        .set_settings(&body)
        .map_err(|e| err_json(400, &e.to_string()))?;

    // Reload runtime config
    reload_and_regenerate(&state).await?;

    let all = state
        .settings()
        .get_all_settings()
        .map_err(|e| err_json(500, &format!("Failed to get settings: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Updated {updated} setting(s) successfully"),
        "settings": all,
    })))
}

/// Reload the runtime config and regenerate if the form size had to move.
async fn reload_and_regenerate(state: &SharedState) -> Result<(), ApiError> {
    let resized = state
        .reload_config()
        .await
        .map_err(|e| err_json(500, &format!("Failed to reload config: {e}")))?;
    if resized {
        if let Err(e) = state.request_generation().await {
            tracing::warn!("Regeneration after settings change failed: {e}");
        }
    }
    Ok(())
}

/// POST /api/settings/reset
pub async fn reset_settings(
    State(state): State<SharedState>,
    body: Option<Json<Value>>,
) -> ApiResult {
    let keys: Vec<String> = body
        .and_then(|Json(b)| b.get("keys").cloned())
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    let reset_count = state
        .settings()
        .reset(&keys)
        .map_err(|e| err_json(500, &e.to_string()))?;

    reload_and_regenerate(&state).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Reset {reset_count} setting(s) to default values"),
    })))
}
