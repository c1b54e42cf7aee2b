use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use super::{api, websocket};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        .route("/ws", get(websocket::ws_handler))
        // --- Presets ---
        .route("/api/presets", get(api::presets::get_presets))
        // --- Form ---
        .route("/api/form", get(api::form::get_form).put(api::form::update_form))
        // --- Gradient ---
        .route("/api/gradient", get(api::gradient::get_gradient))
        .route("/api/gradient/preset/{index}", post(api::gradient::select_preset))
        .route("/api/gradient/custom", put(api::gradient::update_custom))
        // --- Logo ---
        .route(
            "/api/logo",
            get(api::logo::get_logo)
                .post(api::logo::upload_logo)
                .delete(api::logo::delete_logo)
                .layer(DefaultBodyLimit::max(api::logo::MAX_LOGO_SIZE * 2)),
        )
        .route("/api/logo/shape", put(api::logo::update_shape))
        // --- Generation & export ---
        .route("/api/generate", post(api::card::generate))
        .route("/api/preview", get(api::card::preview))
        .route("/api/download/{format}", get(api::card::download))
        .route("/api/scan-instruction", get(api::card::scan_instruction))
        // --- Settings ---
        .route(
            "/api/settings",
            get(api::settings::get_settings).put(api::settings::update_settings),
        )
        .route("/api/settings/reset", post(api::settings::reset_settings))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
