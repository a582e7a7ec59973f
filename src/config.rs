// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON in `$XDG_CONFIG_HOME/camera-coordinator/config.json`.
//! Missing fields fall back to their defaults, so older files keep loading.

use crate::constants::{exposure, timing};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const CONFIG_DIR_NAME: &str = "camera-coordinator";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Popup auto-release delay in milliseconds
    pub popup_release_ms: u64,
    /// Focus ring auto-hide delay in milliseconds
    pub focus_ring_hide_ms: u64,
    /// Recovery cooldown in milliseconds
    pub recovery_cooldown_ms: u64,
    /// Capture timeout in milliseconds
    pub capture_timeout_ms: u64,
    /// Minimum press duration for a focus tap in milliseconds
    pub focus_min_hold_ms: u64,
    /// Share of the hardware exposure range the slider spans (0.25 - 0.30)
    pub exposure_conservative_fraction: f64,
    /// Pulse the haptic engine on snap-to-neutral
    pub haptics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            popup_release_ms: timing::POPUP_RELEASE.as_millis() as u64,
            focus_ring_hide_ms: timing::FOCUS_RING_HIDE.as_millis() as u64,
            recovery_cooldown_ms: timing::RECOVERY_COOLDOWN.as_millis() as u64,
            capture_timeout_ms: timing::CAPTURE_TIMEOUT.as_millis() as u64,
            focus_min_hold_ms: timing::FOCUS_MIN_HOLD.as_millis() as u64,
            exposure_conservative_fraction: exposure::DEFAULT_CONSERVATIVE_FRACTION,
            haptics_enabled: true,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            debug!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let config: Config = serde_json::from_str(contents)?;
        Ok(config.validated())
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Clamp values into their supported ranges
    pub fn validated(mut self) -> Self {
        let fraction = self.exposure_conservative_fraction;
        self.exposure_conservative_fraction = if fraction.is_finite() {
            fraction.clamp(
                exposure::CONSERVATIVE_FRACTION_MIN,
                exposure::CONSERVATIVE_FRACTION_MAX,
            )
        } else {
            exposure::DEFAULT_CONSERVATIVE_FRACTION
        };
        self
    }

    pub fn popup_release(&self) -> Duration {
        Duration::from_millis(self.popup_release_ms)
    }

    pub fn focus_ring_hide(&self) -> Duration {
        Duration::from_millis(self.focus_ring_hide_ms)
    }

    pub fn recovery_cooldown(&self) -> Duration {
        Duration::from_millis(self.recovery_cooldown_ms)
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    pub fn focus_min_hold(&self) -> Duration {
        Duration::from_millis(self.focus_min_hold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "capture_timeout_ms": 8000 }"#).unwrap();
        assert_eq!(config.capture_timeout(), Duration::from_secs(8));
        assert_eq!(config.popup_release(), timing::POPUP_RELEASE);
    }

    #[test]
    fn test_fraction_clamped() {
        let config = Config::from_json(r#"{ "exposure_conservative_fraction": 0.9 }"#).unwrap();
        assert_eq!(
            config.exposure_conservative_fraction,
            exposure::CONSERVATIVE_FRACTION_MAX
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(crate::errors::AppError::Config(_))
        ));
    }
}
