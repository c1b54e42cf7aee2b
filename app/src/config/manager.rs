//! SettingsManager: runtime overrides on top of environment variables and defaults.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use anyhow::{anyhow, bail};

use super::defaults::DEFAULT_SETTINGS;
use super::validation::{validate_setting, validate_size_bounds};
use super::{SettingInfo, SettingSource};

/// Resolves settings from runtime overrides, then the environment, then defaults.
pub struct SettingsManager {
    overrides: RwLock<HashMap<String, String>>,
    use_env: bool,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Manager that reads environment variables.
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
            use_env: true,
        }
    }

    /// Manager that ignores the process environment.
    pub fn isolated() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
            use_env: false,
        }
    }

    fn env_value(&self, key: &str) -> Option<String> {
        if !self.use_env {
            return None;
        }
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn resolve(&self, key: &str) -> Result<(String, SettingSource), anyhow::Error> {
        let overrides = self
            .overrides
            .read()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        if let Some(val) = overrides.get(key) {
            return Ok((val.clone(), SettingSource::Override));
        }
        if let Some(val) = self.env_value(key) {
            return Ok((val, SettingSource::Environment));
        }
        if let Some(def) = DEFAULT_SETTINGS.get(key) {
            return Ok((def.default.to_string(), SettingSource::Default));
        }
        bail!("setting not found: {key}");
    }

    /// Get a setting value. Falls back to the environment, then the default.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        self.resolve(key).map(|(val, _)| val)
    }

    /// Set a single setting value with validation.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let mut batch = HashMap::new();
        batch.insert(key.to_string(), value.to_string());
        self.set_settings(&batch).map(|_| ())
    }

    /// Validate and apply a batch of settings. Nothing is written if any value is rejected.
    pub fn set_settings(&self, values: &HashMap<String, String>) -> Result<usize, anyhow::Error> {
        for (key, value) in values {
            if !DEFAULT_SETTINGS.contains_key(key.as_str()) {
                bail!("unknown setting key: {key}");
            }
            validate_setting(key, value).map_err(|e| anyhow!("validation error for {key}: {e}"))?;
        }

        let merged_u32 = |key: &str| -> Result<u32, anyhow::Error> {
            let raw = match values.get(key) {
                Some(v) => v.clone(),
                None => self.get_setting(key)?,
            };
            raw.parse()
                .map_err(|_| anyhow!("validation error for {key}: must be an integer"))
        };
        validate_size_bounds(
            merged_u32("MIN_SIZE")?,
            merged_u32("DEFAULT_SIZE")?,
            merged_u32("MAX_SIZE")?,
        )
        .map_err(|e| anyhow!("validation error: {e}"))?;

        let mut overrides = self
            .overrides
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        for (key, value) in values {
            overrides.insert(key.clone(), value.clone());
        }
        Ok(values.len())
    }

    /// Drop runtime overrides. An empty list resets every key.
    pub fn reset(&self, keys: &[String]) -> Result<usize, anyhow::Error> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        if keys.is_empty() {
            let count = overrides.len();
            overrides.clear();
            return Ok(count);
        }
        Ok(keys.iter().filter(|k| overrides.remove(*k).is_some()).count())
    }

    /// Get all known settings with their effective values.
    pub fn get_all_settings(&self) -> Result<BTreeMap<String, SettingInfo>, anyhow::Error> {
        let mut result = BTreeMap::new();
        for (key, def) in DEFAULT_SETTINGS.iter() {
            let (value, source) = self.resolve(key)?;
            result.insert(
                key.to_string(),
                SettingInfo {
                    key: key.to_string(),
                    has_value: !value.is_empty(),
                    value,
                    source,
                    description: def.description.to_string(),
                },
            );
        }
        Ok(result)
    }
}
