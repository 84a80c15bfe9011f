use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::hud::COMPLETION_LABEL;
use crate::playtime::DAILY_PLAYTIME_SECS;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {reason}")]
    Validation { reason: String },
}

impl SettingsError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Tunables of the hud service. Fields missing from a settings file fall
/// back to their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HudSettings {
    pub daily_allowance_secs: i64,
    pub update_period_secs: u64,
    pub completion_label: String,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            daily_allowance_secs: DAILY_PLAYTIME_SECS,
            update_period_secs: 1,
            completion_label: COMPLETION_LABEL.to_owned(),
        }
    }
}

impl HudSettings {
    /// Read and validate settings from a json file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.update_period_secs == 0 {
            return Err(SettingsError::validation("update period cannot be 0"));
        }
        if self.daily_allowance_secs <= 0 {
            return Err(SettingsError::validation(
                "daily allowance must be positive",
            ));
        }
        if self.completion_label.is_empty() {
            return Err(SettingsError::validation("completion label cannot be empty"));
        }
        Ok(())
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_secs(self.update_period_secs)
    }
}
