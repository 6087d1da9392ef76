//! Game settings
//!
//! Read once at startup from an optional JSON file. Never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{DamageMode, VehicleClass};

/// Errors raised while reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for [`Settings`]
    #[error("failed to parse settings from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Values parsed but describe an unplayable road
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Asset file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_sprite: PathBuf,
    pub traffic_sprite: PathBuf,
    pub accelerate_sound: PathBuf,
    pub brake_sound: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_sprite: PathBuf::from("assets/player_car.png"),
            traffic_sprite: PathBuf::from("assets/traffic_car.png"),
            accelerate_sound: PathBuf::from("assets/acceleration.mp3"),
            brake_sound: PathBuf::from("assets/tires_screeching.wav"),
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Knobs for the headless autopilot run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessSettings {
    /// Vehicle the autopilot confirms in the selection menu
    pub vehicle: VehicleClass,
    /// Crashes the autopilot respawns from before quitting
    pub max_respawns: u32,
    /// Hard stop on total driving frames (0 = unlimited)
    pub max_frames: u64,
    /// Log a frame summary every N frames (0 = never)
    pub log_every: u64,
}

impl Default for HeadlessSettings {
    fn default() -> Self {
        Self {
            vehicle: VehicleClass::Fast,
            max_respawns: 2,
            max_frames: 60 * 60 * 5,
            log_every: 60,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Road ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub num_lanes: u32,
    pub obstacle_count: usize,

    // === Timing ===
    /// Simulation steps per second (0 = run unpaced)
    pub fps: u32,

    // === Damage ===
    pub max_damage: f32,
    pub damage_per_hit: f32,
    pub damage_mode: DamageMode,

    /// Traffic RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,

    pub assets: AssetPaths,
    pub audio: AudioSettings,
    pub headless: HeadlessSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            num_lanes: NUM_LANES,
            obstacle_count: OBSTACLE_COUNT,

            fps: FPS,

            max_damage: MAX_DAMAGE,
            damage_per_hit: DAMAGE_PER_HIT,
            damage_mode: DamageMode::PerFrame,

            seed: None,

            assets: AssetPaths::default(),
            audio: AudioSettings::default(),
            headless: HeadlessSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that the road can hold the player and traffic
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.num_lanes == 0 {
            return Err(SettingsError::Invalid("num_lanes must be at least 1".into()));
        }
        if self.screen_width < CAR_WIDTH || self.screen_height < CAR_HEIGHT + PLAYER_BOTTOM_GAP {
            return Err(SettingsError::Invalid(format!(
                "screen {}x{} is too small for the player car",
                self.screen_width, self.screen_height
            )));
        }
        if self.lane_width() < OBSTACLE_WIDTH {
            return Err(SettingsError::Invalid(format!(
                "lane width {} is narrower than a traffic car",
                self.lane_width()
            )));
        }
        if !(self.max_damage > 0.0) || !(self.damage_per_hit > 0.0) {
            return Err(SettingsError::Invalid(
                "max_damage and damage_per_hit must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn lane_width(&self) -> f32 {
        crate::lane_width(self.screen_width, self.num_lanes)
    }

    /// Rightmost x the player car may occupy
    pub fn max_player_x(&self) -> f32 {
        self.screen_width - CAR_WIDTH
    }

    /// Seed to use for a new run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.lane_width(), 160.0);
        assert_eq!(settings.max_player_x(), 740.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "seed": 7, "headless": { "vehicle": "Slow" } }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.headless.vehicle, VehicleClass::Slow);
        assert_eq!(settings.headless.max_respawns, 2);
        assert_eq!(settings.num_lanes, NUM_LANES);
        assert_eq!(settings.damage_mode, DamageMode::PerFrame);
    }

    #[test]
    fn test_validate_rejects_zero_lanes() {
        let settings = Settings {
            num_lanes: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_narrow_lanes() {
        let settings = Settings {
            num_lanes: 20,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
