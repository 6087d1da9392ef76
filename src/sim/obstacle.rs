//! Oncoming traffic pool
//!
//! A fixed number of cars that scroll down the screen and are recycled to a
//! fresh lane above the top edge once they leave through the bottom.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{OBSTACLE_WIDTH, SCROLL_FACTOR};
use crate::settings::Settings;

/// Lane geometry of the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub width: f32,
    pub height: f32,
    pub num_lanes: u32,
}

impl Road {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.screen_width,
            height: settings.screen_height,
            num_lanes: settings.num_lanes.max(1),
        }
    }

    pub fn lane_width(&self) -> f32 {
        crate::lane_width(self.width, self.num_lanes)
    }

    /// Left edge of a traffic car centred in `lane`
    pub fn lane_x(&self, lane: u32) -> f32 {
        let lane_width = self.lane_width();
        lane as f32 * lane_width + ((lane_width - OBSTACLE_WIDTH) / 2.0).floor()
    }

    /// Lane whose strip contains the horizontal centre of a car at `x`
    pub fn lane_of(&self, x: f32, car_width: f32) -> u32 {
        let centre = x + car_width / 2.0;
        ((centre / self.lane_width()).floor().max(0.0) as u32).min(self.num_lanes - 1)
    }
}

impl Default for Road {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// A single traffic car
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner of the sprite
    pub pos: Vec2,
}

/// Fixed-size traffic pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePool {
    pub obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    /// Fill a new pool with `count` cars in random lanes above the screen
    pub fn spawn_all<R: Rng>(count: usize, road: &Road, rng: &mut R) -> Self {
        let obstacles = (0..count)
            .map(|_| Obstacle {
                pos: random_spawn(road, rng),
            })
            .collect();
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Per-frame scroll distance for the given player speed
    pub fn scroll_step(speed: f32) -> f32 {
        1.0 + speed * SCROLL_FACTOR
    }

    /// Scroll every car and recycle those past the bottom edge.
    /// Returns the indices that were recycled this frame.
    pub fn advance<R: Rng>(&mut self, speed: f32, road: &Road, rng: &mut R) -> Vec<usize> {
        let step = Self::scroll_step(speed);
        let mut recycled = Vec::new();
        for idx in 0..self.obstacles.len() {
            self.obstacles[idx].pos.y += step;
            if self.obstacles[idx].pos.y > road.height {
                self.recycle(idx, road, rng);
                recycled.push(idx);
            }
        }
        recycled
    }

    /// Send one car back above the screen in a random lane
    pub fn recycle<R: Rng>(&mut self, idx: usize, road: &Road, rng: &mut R) {
        if let Some(obstacle) = self.obstacles.get_mut(idx) {
            obstacle.pos = random_spawn(road, rng);
            log::trace!("Recycled traffic car {} to {:?}", idx, obstacle.pos);
        }
    }
}

fn random_spawn<R: Rng>(road: &Road, rng: &mut R) -> Vec2 {
    let lane = rng.random_range(0..road.num_lanes);
    let y = rng.random_range(-road.height..0.0);
    Vec2::new(road.lane_x(lane), y)
}
