//! Headless collaborators: an autopilot driver and a logging presenter
//!
//! Used by the native binary (no window backend) and by integration tests.

use super::{FrameView, InputSource, Presenter};
use crate::audio::{Playback, SoundEffect};
use crate::consts::*;
use crate::settings::HeadlessSettings;
use crate::sim::{GamePhase, MenuInput, ObstaclePool, TickInput, VehicleClass, VehicleSelection};

/// Frames of travel the autopilot looks ahead for traffic
const LOOKAHEAD_FRAMES: f32 = 30.0;

/// Computer driver: picks a car, dodges traffic, respawns a few times
#[derive(Debug, Clone)]
pub struct Autopilot {
    vehicle: VehicleClass,
    max_respawns: u32,
    max_frames: u64,
    respawns: u32,
    frames: u64,
}

impl Autopilot {
    pub fn new(settings: &HeadlessSettings) -> Self {
        Self {
            vehicle: settings.vehicle,
            max_respawns: settings.max_respawns,
            max_frames: settings.max_frames,
            respawns: 0,
            frames: 0,
        }
    }

    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Whether a traffic car in `lane` is close enough ahead to matter
    fn lane_blocked(frame: &FrameView<'_>, lane: u32) -> bool {
        let player = frame.player;
        let closing = ObstaclePool::scroll_step(player.speed) * LOOKAHEAD_FRAMES;
        let lane_x = frame.road.lane_x(lane);
        frame.obstacles.iter().any(|o| {
            (o.pos.x - lane_x).abs() < OBSTACLE_WIDTH
                && o.pos.y + OBSTACLE_HEIGHT > player.pos.y - closing
                && o.pos.y < player.pos.y + CAR_HEIGHT
        })
    }

    /// Lane to steer for, preferring the current one, then the nearest clear one
    fn pick_lane(frame: &FrameView<'_>) -> Option<u32> {
        let current = frame.road.lane_of(frame.player.pos.x, CAR_WIDTH);
        if !Self::lane_blocked(frame, current) {
            return Some(current);
        }
        let lanes = frame.road.num_lanes as i64;
        (1..lanes).find_map(|d| {
            [current as i64 - d, current as i64 + d]
                .into_iter()
                .filter(|&l| (0..lanes).contains(&l))
                .map(|l| l as u32)
                .find(|&l| !Self::lane_blocked(frame, l))
        })
    }

    fn drive(&self, frame: &FrameView<'_>) -> TickInput {
        let mut input = TickInput::default();
        let player = frame.player;

        match Self::pick_lane(frame) {
            Some(lane) => {
                let target_x = frame.road.lane_x(lane);
                let dx = target_x - player.pos.x;
                let steering = player.profile().steering_speed;
                if dx.abs() >= steering {
                    input.steer_left = dx < 0.0;
                    input.steer_right = dx > 0.0;
                }
                input.throttle = true;
            }
            // Boxed in: scrub speed so traffic passes slower
            None => input.brake = true,
        }
        input
    }
}

impl InputSource for Autopilot {
    fn poll_menu(&mut self, selection: &VehicleSelection) -> MenuInput {
        if selection.highlighted() == self.vehicle {
            MenuInput {
                confirm: true,
                ..Default::default()
            }
        } else {
            MenuInput {
                right: true,
                ..Default::default()
            }
        }
    }

    fn poll(&mut self, frame: &FrameView<'_>) -> TickInput {
        match frame.phase {
            GamePhase::Driving => {
                self.frames += 1;
                if self.max_frames > 0 && self.frames > self.max_frames {
                    log::info!("Autopilot frame budget spent, quitting");
                    return TickInput {
                        quit: true,
                        ..Default::default()
                    };
                }
                self.drive(frame)
            }
            GamePhase::Crashed if self.respawns < self.max_respawns => {
                self.respawns += 1;
                TickInput {
                    respawn: true,
                    ..Default::default()
                }
            }
            GamePhase::Crashed | GamePhase::SessionEnded => TickInput {
                quit: true,
                ..Default::default()
            },
        }
    }
}

/// Presenter that writes what it would draw to the log
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    log_every: u64,
    pub frames_rendered: u64,
    pub menus_rendered: u64,
    pub crash_overlays: u64,
    pub cues: Vec<SoundEffect>,
    last_menu: Option<usize>,
    overlay_shown: bool,
}

impl LogPresenter {
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            ..Default::default()
        }
    }
}

impl Presenter for LogPresenter {
    fn render_frame(&mut self, frame: &FrameView<'_>) {
        self.frames_rendered += 1;
        self.overlay_shown = false;
        if self.log_every > 0 && frame.frame % self.log_every == 0 {
            let lane = frame.road.lane_of(frame.player.pos.x, CAR_WIDTH);
            log::info!(
                "frame={} speed={} km/h lane={} x={:.0} angle={:.0} damage={:.0}/{:.0}%",
                frame.frame,
                frame.speed_kmh,
                lane,
                frame.player.pos.x,
                frame.player.angle,
                frame.damage,
                frame.damage_ratio * 100.0
            );
        }
    }

    fn render_menu(&mut self, names: &[&str], selected: usize) {
        self.menus_rendered += 1;
        if self.last_menu != Some(selected) {
            log::info!("Select Your Car: > {} <", names.get(selected).copied().unwrap_or("?"));
            self.last_menu = Some(selected);
        }
    }

    fn render_crash_overlay(&mut self, frame: &FrameView<'_>) {
        if !self.overlay_shown {
            self.crash_overlays += 1;
            self.overlay_shown = true;
            log::info!(
                "Crashed! Press R to Respawn or Q to Quit (frame {}, damage {:.0})",
                frame.frame,
                frame.damage
            );
        }
    }

    fn play(&mut self, playback: &Playback) {
        log::debug!(
            "sound {:?} vol={:.2}{}",
            playback.effect,
            playback.volume,
            if playback.looping { " (loop)" } else { "" }
        );
        self.cues.push(playback.effect);
    }
}
