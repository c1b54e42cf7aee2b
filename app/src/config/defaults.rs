//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("SERVER_PORT", "8080", "HTTP server port"),
    (
        "DEFAULT_URL",
        "https://restaurant-menu-3d-food.vercel.app/",
        "URL encoded when the form URL is empty",
    ),
    ("DEFAULT_SIZE", "250", "Initial QR size in pixels"),
    ("MIN_SIZE", "150", "Smallest QR size accepted by the form"),
    ("MAX_SIZE", "400", "Largest QR size accepted by the form"),
    ("DEBOUNCE_DELAY_MS", "300", "Quiet period before a regeneration runs"),
    ("RENDER_SYNC", "signal", "Wait for the renderer to finish ('signal') or sleep a fixed delay ('delay')"),
    ("RENDER_DELAY_MS", "500", "Fixed wait used when RENDER_SYNC is 'delay'"),
    ("LOGO_MARGIN", "5", "Clearance around the logo in pixels"),
    ("LOGO_SIZE", "0.4", "Logo size as a fraction of the QR symbol"),
    ("FONT_DIR", "", "Extra directory scanned for TTF/OTF fonts"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_passes_validation() {
        for def in DEFAULT_SETTINGS.values() {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
        }
    }

    #[test]
    fn unknown_key_has_no_default() {
        assert_eq!(get_default("DEBOUNCE_DELAY_MS"), Some("300"));
        assert_eq!(get_default("NOPE"), None);
    }
}
