//! Persisted application configuration.
//!
//! Stored as TOML in the platform config directory under the `raidsight`
//! app name. Unknown or missing fields fall back to defaults so old config
//! files keep working across upgrades.

use raidsight_types::FightScope;
use serde::{Deserialize, Serialize};

use crate::context::error::ConfigError;
use crate::game_data::{STATUS_EFFECT_DEBUFFS, STATUS_EFFECT_HOSTILE_BUFFS};

const APP_NAME: &str = "raidsight";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scope preselected when a report is opened.
    pub default_scope: FightScope,
    /// Debuff ids the dashboard widgets surface by default.
    pub important_debuffs: Vec<i64>,
    /// Hostile buff ids the dashboard widgets surface by default.
    pub important_hostile_buffs: Vec<i64>,
    /// Show effects with zero recorded uptime instead of omitting them.
    pub show_empty_effects: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_scope: FightScope::default(),
            important_debuffs: STATUS_EFFECT_DEBUFFS.to_vec(),
            important_hostile_buffs: STATUS_EFFECT_HOSTILE_BUFFS.to_vec(),
            show_empty_effects: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    /// Load, falling back to defaults on a missing or unreadable file.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}
