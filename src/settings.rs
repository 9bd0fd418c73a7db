//! Game settings with persistence
//!
//! Settings are saved to `~/.config/gladiator/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gladiator_audio::AudioConfig;
use gladiator_integration::{NarrativeConfig, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub audio: AudioSettings,
    pub gameplay: GameplaySettings,
    pub narrative: NarrativeSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gladiator"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(dir) = Self::config_dir() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&dir.join("settings.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&dir.join("settings.toml"))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 to 1.0)
    pub master: f64,
    /// Music volume (0.0 to 1.0)
    pub music: f64,
    /// Sound effects volume (0.0 to 1.0)
    pub sfx: f64,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 0.8,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    pub fn to_config(&self) -> AudioConfig {
        AudioConfig {
            master_volume: self.master.clamp(0.0, 1.0),
            music_volume: self.music.clamp(0.0, 1.0),
            sfx_volume: self.sfx.clamp(0.0, 1.0),
            muted: self.muted,
        }
    }
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Pause before the enemy acts, in milliseconds (cosmetic)
    pub turn_delay_ms: u64,
    /// Combat log lines shown after each turn
    pub combat_log_limit: usize,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            turn_delay_ms: 1000,
            combat_log_limit: 10,
        }
    }
}

impl GameplaySettings {
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }
}

/// Backstory generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    pub enabled: bool,
    pub model: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            api_key_env: "API_KEY".to_string(),
        }
    }
}

impl NarrativeSettings {
    /// Client configuration, reading the key from the environment
    pub fn to_config(&self) -> NarrativeConfig {
        let api_key = if self.enabled {
            std::env::var(&self.api_key_env).ok()
        } else {
            None
        };
        NarrativeConfig {
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let settings = GameSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: GameSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: GameSettings = toml::from_str("[gameplay]\nturn_delay_ms = 0\n").unwrap();
        assert_eq!(parsed.gameplay.turn_delay_ms, 0);
        assert_eq!(parsed.gameplay.combat_log_limit, 10);
        assert_eq!(parsed.audio, AudioSettings::default());
        assert_eq!(parsed.narrative.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_audio_volumes_clamped() {
        let audio = AudioSettings {
            master: 2.0,
            music: -1.0,
            ..AudioSettings::default()
        };
        let config = audio.to_config();
        assert_eq!(config.master_volume, 1.0);
        assert_eq!(config.music_volume, 0.0);
    }

    #[test]
    fn test_disabled_narrative_has_no_key() {
        let narrative = NarrativeSettings {
            enabled: false,
            ..NarrativeSettings::default()
        };
        assert!(narrative.to_config().api_key.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("gladiator-no-such-settings.toml");
        assert_eq!(GameSettings::load_from(&path), GameSettings::default());
    }
}
