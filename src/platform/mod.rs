//! Platform abstraction layer
//!
//! The simulation never touches a window or a keyboard. It talks to:
//! - an [`InputSource`] polled once per frame
//! - a [`Presenter`] that draws frames, menus and plays sound cues
//! - a [`FramePacer`] that holds the tick rate

pub mod headless;
pub mod input;
pub mod time;

pub use headless::{Autopilot, LogPresenter};
pub use input::{InputSource, ScriptedInput};
pub use time::FramePacer;

use crate::audio::Playback;
use crate::sim::{GamePhase, Obstacle, PlayerState, Road, Session};

/// Read-only view of one frame for presentation
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub frame: u64,
    pub road: &'a Road,
    pub player: &'a PlayerState,
    pub obstacles: &'a [Obstacle],
    pub damage: f32,
    /// Damage bar fill (0.0 - 1.0)
    pub damage_ratio: f32,
    pub speed_kmh: u32,
}

impl<'a> FrameView<'a> {
    pub fn of(session: &'a Session) -> Self {
        Self {
            phase: session.phase,
            frame: session.frame,
            road: &session.road,
            player: &session.player,
            obstacles: &session.pool.obstacles,
            damage: session.damage.damage,
            damage_ratio: session.damage.ratio(),
            speed_kmh: session.player.speed_kmh(),
        }
    }
}

/// Output side of the game: pixels and sound
pub trait Presenter {
    /// Draw road, cars, damage bar and speed readout
    fn render_frame(&mut self, frame: &FrameView<'_>);

    /// Draw the vehicle selection menu
    fn render_menu(&mut self, names: &[&str], selected: usize);

    /// Draw the "Crashed! Press R to Respawn or Q to Quit" screen
    fn render_crash_overlay(&mut self, frame: &FrameView<'_>);

    fn play(&mut self, playback: &Playback);
}
