//! The player's car: position, steering angle and speed

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, player_hitbox};
use super::obstacle::Road;
use super::profile::{VehicleClass, VehicleProfile};
use crate::consts::*;
use crate::speed_to_kmh;

/// Player car state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Forward speed in sim units (see [`crate::to_nominal_speed`])
    pub speed: f32,
    /// Visual tilt in degrees; positive leans left
    pub angle: f32,
    pub class: VehicleClass,
    /// Whether the engine loop cue is currently playing
    #[serde(default)]
    pub engine_running: bool,
    /// Whether the brake was held last frame
    #[serde(default)]
    pub braking: bool,
}

impl PlayerState {
    /// Place a stationary car at the bottom centre of the road
    pub fn spawn(class: VehicleClass, road: &Road) -> Self {
        Self {
            pos: Vec2::new(
                (road.width / 2.0).floor() - (CAR_WIDTH / 2.0).floor(),
                road.height - CAR_HEIGHT - PLAYER_BOTTOM_GAP,
            ),
            speed: 0.0,
            angle: 0.0,
            class,
            engine_running: false,
            braking: false,
        }
    }

    pub fn profile(&self) -> &'static VehicleProfile {
        self.class.profile()
    }

    pub fn hitbox(&self) -> Rect {
        player_hitbox(self.pos)
    }

    /// HUD speed in km/h
    pub fn speed_kmh(&self) -> u32 {
        speed_to_kmh(self.speed)
    }

    /// Apply steering for one frame. Returns whether the car turned.
    ///
    /// A direction is ignored when the car already sits on that edge.
    pub fn steer(&mut self, left: bool, right: bool, road: &Road) -> bool {
        let steering = self.profile().steering_speed;
        let max_x = road.width - CAR_WIDTH;
        let mut turning = false;

        if left && self.pos.x > 0.0 {
            self.pos.x -= steering;
            self.angle += 1.0;
            turning = true;
        }
        if right && self.pos.x < max_x {
            self.pos.x += steering;
            self.angle -= 1.0;
            turning = true;
        }

        self.clamp_x(road);
        turning
    }

    /// Keep the car on the road horizontally
    pub fn clamp_x(&mut self, road: &Road) {
        self.pos.x = self.pos.x.clamp(0.0, (road.width - CAR_WIDTH).max(0.0));
    }

    /// Throttle for one frame: linear up to nominal top speed, then a slow
    /// creep toward the boosted ceiling.
    pub fn throttle(&mut self) {
        let profile = self.profile();
        let nominal = profile.nominal_top_speed();
        if self.speed < nominal {
            self.speed = (self.speed + profile.acceleration).min(nominal);
        } else {
            self.speed = (self.speed + OVERDRIVE_CREEP).min(profile.boosted_top_speed());
        }
    }

    pub fn brake(&mut self) {
        self.speed = (self.speed - BRAKE_DECEL).max(0.0);
    }

    /// Return the tilt toward zero without overshooting
    pub fn decay_angle(&mut self) {
        if self.angle > 0.0 {
            self.angle = (self.angle - ANGLE_DECAY).max(0.0);
        } else if self.angle < 0.0 {
            self.angle = (self.angle + ANGLE_DECAY).min(0.0);
        }
    }

    /// True while still in the linear acceleration phase
    pub fn below_nominal(&self) -> bool {
        self.speed < self.profile().nominal_top_speed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let road = Road::default();
        let p = PlayerState::spawn(VehicleClass::Fast, &road);
        assert_eq!(p.pos, Vec2::new(370.0, 680.0));
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_steer_left_clamps_at_edge() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Fast, &road);
        p.pos.x = 5.0;
        assert!(p.steer(true, false, &road));
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.angle, 1.0);
        // Already at the edge: no movement, no tilt
        assert!(!p.steer(true, false, &road));
        assert_eq!(p.angle, 1.0);
    }

    #[test]
    fn test_steer_right_clamps_at_edge() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Slow, &road);
        p.pos.x = 735.0;
        assert!(p.steer(false, true, &road));
        assert_eq!(p.pos.x, 740.0);
        assert_eq!(p.angle, -1.0);
    }

    #[test]
    fn test_steer_both_cancels_tilt() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Medium, &road);
        assert!(p.steer(true, true, &road));
        assert_eq!(p.pos.x, 370.0);
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_throttle_caps_at_nominal_then_creeps() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Fast, &road);
        let nominal = p.profile().nominal_top_speed();
        p.speed = nominal - 0.1;
        p.throttle();
        assert_eq!(p.speed, nominal);
        p.throttle();
        assert!((p.speed - (nominal + OVERDRIVE_CREEP)).abs() < 1e-4);

        let boosted = p.profile().boosted_top_speed();
        p.speed = boosted - 0.001;
        p.throttle();
        assert_eq!(p.speed, boosted);
    }

    #[test]
    fn test_brake_floors_at_zero() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Fast, &road);
        p.speed = 0.05;
        p.brake();
        assert_eq!(p.speed, 0.0);
    }

    #[test]
    fn test_angle_decay_no_overshoot() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Fast, &road);
        p.angle = 4.0;
        p.decay_angle();
        assert_eq!(p.angle, 1.0);
        p.decay_angle();
        assert_eq!(p.angle, 0.0);
        p.angle = -2.0;
        p.decay_angle();
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_speed_kmh_truncates() {
        let road = Road::default();
        let mut p = PlayerState::spawn(VehicleClass::Fast, &road);
        p.speed = 4.9;
        assert_eq!(p.speed_kmh(), 17);
    }
}
