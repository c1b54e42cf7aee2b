//! Configuration management: defaults, validation, loading from overrides + environment.

pub mod app_config;
pub mod defaults;
pub mod manager;
pub mod validation;

pub use app_config::{AppConfig, RenderSync};
pub use manager::SettingsManager;

use serde::{Deserialize, Serialize};

/// Where an effective setting value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    Override,
    Environment,
    Default,
}

/// A setting as returned to API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingInfo {
    pub key: String,
    pub value: String,
    pub source: SettingSource,
    pub description: String,
    pub has_value: bool,
}
