//! GET /api/presets – gradient presets, preset colors, fonts and shape ids.

use axum::Json;
use axum::extract::State;
use qr_engine::{CornerDotShape, CornerSquareShape, DotShape, LogoShape};
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::presets::{FONT_OPTIONS, GRADIENT_PRESETS, PRESET_COLORS};

use super::ApiResult;

/// GET /api/presets
pub async fn get_presets(State(state): State<SharedState>) -> ApiResult {
    let gradients: Vec<Value> = GRADIENT_PRESETS
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            json!({
                "index": index,
                "name": preset.name,
                "colors": preset.colors,
                "css": preset.gradient().map(|g| g.css()).unwrap_or_default(),
            })
        })
        .collect();

    let installed = state.font_families();
    let fonts: Vec<Value> = FONT_OPTIONS
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "family": f.family,
                "available": installed.contains(&f.family.to_lowercase()),
            })
        })
        .collect();

    Ok(Json(json!({
        "gradients": gradients,
        "colors": PRESET_COLORS,
        "fonts": fonts,
        "shapes": {
            "dots": DotShape::ALL,
            "cornerSquare": CornerSquareShape::ALL,
            "cornerDot": CornerDotShape::ALL,
            "logo": LogoShape::ALL,
        },
    })))
}
