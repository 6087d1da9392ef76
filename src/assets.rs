//! Owned game resources
//!
//! Sprites are required: a missing or unreadable image aborts startup.
//! Sounds are optional: failures downgrade to silent play.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::consts::*;
use crate::settings::AssetPaths;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// File does not exist
    #[error("asset not found: {}", .path.display())]
    Missing { path: PathBuf },

    /// File exists but could not be read
    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is empty
    #[error("asset is empty: {}", .path.display())]
    Empty { path: PathBuf },

    /// File is not a readable PNG image
    #[error("corrupt image {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: &'static str },
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Check the PNG signature and IHDR chunk; returns the pixel dimensions
fn png_dimensions(data: &[u8]) -> Result<(u32, u32), &'static str> {
    if data.len() < 24 || data[..8] != PNG_SIGNATURE {
        return Err("missing PNG signature");
    }
    let ihdr_len = u32::from_be_bytes([data[8], data[9], data[10], data[11]]);
    if ihdr_len != 13 || &data[12..16] != b"IHDR" || data.len() < 33 {
        return Err("missing IHDR header");
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    if width == 0 || height == 0 {
        return Err("zero-sized image");
    }
    Ok((width, height))
}

fn read_asset(path: &Path) -> Result<Vec<u8>, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => AssetError::Missing {
            path: path.to_path_buf(),
        },
        _ => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if bytes.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

/// Encoded image plus the size it is drawn at
#[derive(Debug, Clone)]
pub struct Sprite {
    pub path: PathBuf,
    pub data: Vec<u8>,
    /// Pixel dimensions from the PNG header
    pub pixels: (u32, u32),
    /// On-screen size; the image is scaled to fit
    pub size: Vec2,
}

impl Sprite {
    pub fn load(path: &Path, size: Vec2) -> Result<Self, AssetError> {
        let data = read_asset(path)?;
        let pixels = png_dimensions(&data).map_err(|reason| AssetError::Corrupt {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!(
            "Loaded sprite {} ({}x{} px, {} bytes)",
            path.display(),
            pixels.0,
            pixels.1,
            data.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            data,
            pixels,
            size,
        })
    }
}

/// Encoded sound clip
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl SoundClip {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let data = read_asset(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }
}

/// Engine and brake clips
#[derive(Debug, Clone)]
pub struct SoundBank {
    pub accelerate: SoundClip,
    pub brake: SoundClip,
}

impl SoundBank {
    pub fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        Ok(Self {
            accelerate: SoundClip::load(&paths.accelerate_sound)?,
            brake: SoundClip::load(&paths.brake_sound)?,
        })
    }
}

/// Everything loaded from disk before the first frame
#[derive(Debug)]
pub struct GameResources {
    pub player_sprite: Sprite,
    pub traffic_sprite: Sprite,
    /// `None` when audio failed to load
    pub sounds: Option<SoundBank>,
}

impl GameResources {
    /// Load sprites (fatal on failure) and sounds (soft failure)
    pub fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        let player_sprite = Sprite::load(&paths.player_sprite, Vec2::new(CAR_WIDTH, CAR_HEIGHT))?;
        let traffic_sprite = Sprite::load(
            &paths.traffic_sprite,
            Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        )?;

        let sounds = match SoundBank::load(paths) {
            Ok(bank) => Some(bank),
            Err(e) => {
                log::warn!("Failed to load sound: {e} - audio disabled");
                None
            }
        };

        log::info!(
            "Resources loaded (audio {})",
            if sounds.is_some() { "enabled" } else { "disabled" }
        );
        Ok(Self {
            player_sprite,
            traffic_sprite,
            sounds,
        })
    }

    pub fn audio_available(&self) -> bool {
        self.sounds.is_some()
    }
}

impl Drop for GameResources {
    fn drop(&mut self) {
        log::debug!("Releasing game resources");
    }
}
