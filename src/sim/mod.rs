//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod damage;
pub mod obstacle;
pub mod player;
pub mod profile;
pub mod state;
pub mod tick;

pub use collision::{Rect, colliding, obstacle_box, player_hitbox, resolve_push};
pub use damage::{ContactSet, DamageMode, DamageState};
pub use obstacle::{Obstacle, ObstaclePool, Road};
pub use player::PlayerState;
pub use profile::{MenuInput, VehicleClass, VehicleProfile, VehicleSelection};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{TickInput, tick};
