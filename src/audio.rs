//! Audio cue routing
//!
//! Turns simulation events into sound cues for the presenter. When sounds
//! failed to load the manager stays silent and the game plays on.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Start the looping engine clip
    EngineStart,
    /// Stop the engine loop
    EngineStop,
    /// Tyre screech while braking
    BrakeSqueal,
    /// Cut the tyre screech
    BrakeStop,
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub effect: SoundEffect,
    /// Effective volume (0.0 - 1.0)
    pub volume: f32,
    /// Whether the clip repeats until stopped
    pub looping: bool,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    enabled: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    engine_looping: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings, sounds_loaded: bool) -> Self {
        if !sounds_loaded {
            log::warn!("No sound clips loaded - audio disabled");
        }
        Self {
            enabled: sounds_loaded,
            master_volume: settings.audio.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.audio.sfx_volume.clamp(0.0, 1.0),
            muted: settings.audio.muted,
            engine_looping: false,
        }
    }

    /// Manager that never produces cues
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
            engine_looping: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Sound cue for a simulation event, if any
    pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::EngineStarted => Some(SoundEffect::EngineStart),
            GameEvent::EngineStopped | GameEvent::Destroyed { .. } | GameEvent::Quit => {
                Some(SoundEffect::EngineStop)
            }
            GameEvent::Braking => Some(SoundEffect::BrakeSqueal),
            GameEvent::BrakeReleased => Some(SoundEffect::BrakeStop),
            GameEvent::Collision { .. } | GameEvent::Respawned => None,
        }
    }

    /// Route one event; returns the playback to hand to the presenter
    pub fn handle(&mut self, event: &GameEvent) -> Option<Playback> {
        let effect = Self::cue_for(event)?;

        // Stop cues only matter when the loop is actually running
        match effect {
            SoundEffect::EngineStart if self.engine_looping => return None,
            SoundEffect::EngineStart => self.engine_looping = true,
            SoundEffect::EngineStop if !self.engine_looping => return None,
            SoundEffect::EngineStop => self.engine_looping = false,
            _ => {}
        }

        if !self.enabled {
            return None;
        }
        let volume = self.effective_volume();
        if volume <= 0.0 && !matches!(effect, SoundEffect::EngineStop | SoundEffect::BrakeStop) {
            return None;
        }
        Some(Playback {
            effect,
            volume,
            looping: effect == SoundEffect::EngineStart,
        })
    }
}
