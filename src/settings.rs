//! Driver settings and preferences
//!
//! These pick how the simulation is run, not the rules it runs by. Loaded from
//! LocalStorage on the web and from a JSON file on native; never written back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which motion model the balls are built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionPolicy {
    /// Heading + speed; speed follows territory share
    #[default]
    TerritorySpeed,
    /// Velocity vector with per-axis noise and clamping
    Jitter,
}

impl MotionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionPolicy::TerritorySpeed => "TerritorySpeed",
            MotionPolicy::Jitter => "Jitter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "territoryspeed" | "territory" | "polar" => Some(MotionPolicy::TerritorySpeed),
            "jitter" | "vector" => Some(MotionPolicy::Jitter),
            _ => None,
        }
    }
}

/// Failure to read settings from an external source
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Motion model for every ball
    pub motion_policy: MotionPolicy,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Emit periodic diagnostics snapshots
    pub diagnostics: bool,
    /// Stop a native headless run after this many frames (`None` = run forever)
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            motion_policy: MotionPolicy::TerritorySpeed,
            seed: None,
            diagnostics: true,
            max_frames: None,
        }
    }
}

impl Settings {
    /// Environment variable naming a JSON settings file (native only)
    pub const ENV_PATH: &'static str = "PONG_WARS_SETTINGS";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pong_wars_settings";

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `PONG_WARS_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} ({}); using defaults", e, path);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.motion_policy, MotionPolicy::TerritorySpeed);
        assert!(settings.diagnostics);
    }

    #[test]
    fn test_partial_override() {
        let settings =
            Settings::from_json(r#"{"motion_policy": "Jitter", "seed": 42}"#).unwrap();
        assert_eq!(settings.motion_policy, MotionPolicy::Jitter);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_frames, None);
    }

    #[test]
    fn test_roundtrip_json() {
        let settings = Settings {
            motion_policy: MotionPolicy::Jitter,
            seed: Some(7),
            diagnostics: false,
            max_frames: Some(500),
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(MotionPolicy::from_str("Vector"), Some(MotionPolicy::Jitter));
        assert_eq!(MotionPolicy::from_str("polar"), Some(MotionPolicy::TerritorySpeed));
        assert_eq!(MotionPolicy::from_str("bogus"), None);
    }
}
