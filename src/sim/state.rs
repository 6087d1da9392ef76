//! Session state and core simulation types
//!
//! Everything a single play-through mutates lives in [`Session`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::damage::{ContactSet, DamageMode, DamageState};
use super::obstacle::{ObstaclePool, Road};
use super::player::PlayerState;
use super::profile::VehicleClass;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active driving
    Driving,
    /// Car destroyed; waiting for respawn or quit
    Crashed,
    /// Player quit; terminal
    SessionEnded,
}

/// Things that happened during a tick, for presentation and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player overlapped a traffic car and took damage
    Collision { obstacle: usize, damage: f32 },
    /// Damage reached the ceiling
    Destroyed { damage: f32 },
    /// Fresh car after a crash
    Respawned,
    /// Session ended by the player
    Quit,
    /// Engine loop should start
    EngineStarted,
    /// Engine loop should stop
    EngineStopped,
    /// Brake held this frame
    Braking,
    /// Brake let go while still moving
    BrakeReleased,
}

/// One play-through with a fixed vehicle
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the traffic RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub road: Road,
    pub player: PlayerState,
    pub pool: ObstaclePool,
    pub damage: DamageState,
    pub damage_per_hit: f32,
    pub damage_mode: DamageMode,
    pub contacts: ContactSet,
    pub phase: GamePhase,
    /// Driving frames simulated since the session began
    pub frame: u64,
    /// Number of times the car has been destroyed
    pub crashes: u32,
    obstacle_count: usize,
}

impl Session {
    /// Start a session: car at the bottom centre, traffic above the screen.
    ///
    /// `settings` must pass [`Settings::validate`]; a zero-height road has no
    /// spawn rows and panics here.
    pub fn new(class: VehicleClass, seed: u64, settings: &Settings) -> Self {
        debug_assert!(settings.validate().is_ok(), "unvalidated settings");
        let road = Road::from_settings(settings);
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = ObstaclePool::spawn_all(settings.obstacle_count, &road, &mut rng);
        log::info!(
            "Session started: vehicle={} seed={} lanes={} traffic={}",
            class,
            seed,
            road.num_lanes,
            settings.obstacle_count
        );
        Self {
            seed,
            rng,
            road,
            player: PlayerState::spawn(class, &road),
            pool,
            damage: DamageState::new(settings.max_damage),
            damage_per_hit: settings.damage_per_hit,
            damage_mode: settings.damage_mode,
            contacts: ContactSet::default(),
            phase: GamePhase::Driving,
            frame: 0,
            crashes: 0,
            obstacle_count: settings.obstacle_count,
        }
    }

    pub fn class(&self) -> VehicleClass {
        self.player.class
    }

    /// Split borrow used by the tick: traffic and RNG at once
    pub(crate) fn pool_and_rng(&mut self) -> (&mut ObstaclePool, &Road, &mut Pcg32) {
        (&mut self.pool, &self.road, &mut self.rng)
    }

    /// Restart after a crash with the same vehicle.
    /// Returns false (and does nothing) unless the car is crashed.
    pub fn respawn(&mut self) -> bool {
        if self.phase != GamePhase::Crashed {
            return false;
        }
        self.player = PlayerState::spawn(self.player.class, &self.road);
        self.pool = ObstaclePool::spawn_all(self.obstacle_count, &self.road, &mut self.rng);
        self.damage.reset();
        self.contacts.clear();
        self.phase = GamePhase::Driving;
        log::info!("Respawned {} (crash #{})", self.player.class, self.crashes);
        true
    }

    /// End the session from any phase
    pub fn quit(&mut self) {
        if self.phase != GamePhase::SessionEnded {
            log::info!("Session ended after {} frames", self.frame);
        }
        self.phase = GamePhase::SessionEnded;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::SessionEnded
    }
}
