//! Runtime application configuration loaded from settings + environment.

use std::path::PathBuf;
use std::time::Duration;

use super::manager::SettingsManager;

/// How the pipeline waits for the QR renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSync {
    /// Await the renderer's completion.
    Signal,
    /// Sleep a fixed delay, then use whatever the renderer produced by then.
    Delay(Duration),
}

/// Typed runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_port: u16,
    pub default_url: String,
    pub default_size: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub debounce_delay: Duration,
    pub render_sync: RenderSync,
    pub logo_margin: u32,
    pub logo_size: f32,
    pub font_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            default_url: "https://restaurant-menu-3d-food.vercel.app/".into(),
            default_size: 250,
            min_size: 150,
            max_size: 400,
            debounce_delay: Duration::from_millis(300),
            render_sync: RenderSync::Signal,
            logo_margin: 5,
            logo_size: 0.4,
            font_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager.
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let d = Self::default();
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };

        let mut min_size = parse_or(&g("MIN_SIZE"), d.min_size);
        let mut max_size = parse_or(&g("MAX_SIZE"), d.max_size);
        if min_size > max_size {
            tracing::warn!(min_size, max_size, "MIN_SIZE is larger than MAX_SIZE, swapping");
            std::mem::swap(&mut min_size, &mut max_size);
        }
        let default_size = parse_or(&g("DEFAULT_SIZE"), d.default_size).clamp(min_size, max_size);

        let render_sync = match g("RENDER_SYNC").as_str() {
            "delay" => RenderSync::Delay(Duration::from_millis(parse_or(&g("RENDER_DELAY_MS"), 500))),
            _ => RenderSync::Signal,
        };

        let default_url = {
            let url = g("DEFAULT_URL");
            if url.is_empty() { d.default_url } else { url }
        };

        let font_dir = {
            let dir = g("FONT_DIR");
            if dir.is_empty() { None } else { Some(PathBuf::from(dir)) }
        };

        Ok(Self {
            server_port: parse_or(&g("SERVER_PORT"), d.server_port),
            default_url,
            default_size,
            min_size,
            max_size,
            debounce_delay: Duration::from_millis(parse_or(&g("DEBOUNCE_DELAY_MS"), 300)),
            render_sync,
            logo_margin: parse_or(&g("LOGO_MARGIN"), d.logo_margin),
            logo_size: parse_or(&g("LOGO_SIZE"), d.logo_size),
            font_dir,
        })
    }

    /// Reload config from the settings manager.
    pub fn reload(&mut self, sm: &SettingsManager) -> Result<(), anyhow::Error> {
        *self = Self::load(sm)?;
        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults() {
        let config = AppConfig::load(&SettingsManager::isolated()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn delay_mode_uses_render_delay() {
        let sm = SettingsManager::isolated();
        sm.set_setting("RENDER_SYNC", "delay").unwrap();
        sm.set_setting("RENDER_DELAY_MS", "120").unwrap();
        let config = AppConfig::load(&sm).unwrap();
        assert_eq!(config.render_sync, RenderSync::Delay(Duration::from_millis(120)));
    }

    #[test]
    fn font_dir_is_optional() {
        let sm = SettingsManager::isolated();
        assert_eq!(AppConfig::load(&sm).unwrap().font_dir, None);
        sm.set_setting("FONT_DIR", "/opt/fonts").unwrap();
        assert_eq!(
            AppConfig::load(&sm).unwrap().font_dir,
            Some(PathBuf::from("/opt/fonts"))
        );
    }

    #[test]
    fn reload_picks_up_changes() {
        let sm = SettingsManager::isolated();
        let mut config = AppConfig::load(&sm).unwrap();
        sm.set_setting("DEBOUNCE_DELAY_MS", "25").unwrap();
        config.reload(&sm).unwrap();
        assert_eq!(config.debounce_delay, Duration::from_millis(25));
    }

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or("", 7u32), 7);
        assert_eq!(parse_or("x", 7u32), 7);
        assert_eq!(parse_or("9", 7u32), 9);
        assert_eq!(parse_or("0.25", 0.4f32), 0.25);
    }
}
