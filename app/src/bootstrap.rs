//! Startup: environment, settings and fonts.

use qr_canvas::FontLibrary;

use crate::config::{AppConfig, SettingsManager};
use crate::services::fonts::FontService;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load the environment and settings, then build the font library.
pub fn init_foundation() -> Result<(SettingsManager, AppConfig, FontLibrary), anyhow::Error> {
    load_dotenv();

    let sm = SettingsManager::new();
    let config = AppConfig::load(&sm)?;
    tracing::info!(
        port = config.server_port,
        debounce_ms = config.debounce_delay.as_millis() as u64,
        render_sync = ?config.render_sync,
        "Settings loaded"
    );

    let fonts = FontService::new(config.font_dir.clone()).load_library();
    Ok((sm, config, fonts))
}
