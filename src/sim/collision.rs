//! Collision detection and push-out for axis-aligned car boxes
//!
//! The player's box is shrunk by [`COLLISION_INSET`] so grazing the sprite's
//! transparent corners does not count as contact.

use glam::Vec2;

use super::obstacle::ObstaclePool;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Player hitbox for a car whose sprite starts at `pos`
pub fn player_hitbox(pos: Vec2) -> Rect {
    Rect::new(
        pos.x + COLLISION_INSET,
        pos.y + COLLISION_INSET,
        CAR_WIDTH - COLLISION_INSET,
        CAR_HEIGHT - COLLISION_INSET,
    )
}

/// Full sprite box of a traffic car
pub fn obstacle_box(pos: Vec2) -> Rect {
    Rect::new(pos.x, pos.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
}

/// Indices of every obstacle overlapping the player, ascending
pub fn colliding(hitbox: &Rect, pool: &ObstaclePool) -> Vec<usize> {
    pool.obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| hitbox.intersects(&obstacle_box(o.pos)))
        .map(|(i, _)| i)
        .collect()
}

/// Where to move the player so it sits against the obstacle it hit
///
/// Rules are tried in order (above, below, left, right); the first whose
/// condition holds wins. `None` means the car is too deep for any rule and
/// stays where it is.
pub fn resolve_push(player: Vec2, obstacle: Vec2) -> Option<Vec2> {
    if player.y + CAR_HEIGHT <= obstacle.y + PUSH_MARGIN {
        Some(Vec2::new(player.x, obstacle.y - CAR_HEIGHT))
    } else if player.y >= obstacle.y + PUSH_MARGIN + OBSTACLE_HEIGHT {
        Some(Vec2::new(player.x, obstacle.y + OBSTACLE_HEIGHT))
    } else if player.x + CAR_WIDTH <= obstacle.x + PUSH_MARGIN {
        Some(Vec2::new(obstacle.x - CAR_WIDTH, player.y))
    } else if player.x >= obstacle.x + PUSH_MARGIN + OBSTACLE_WIDTH {
        Some(Vec2::new(obstacle.x + OBSTACLE_WIDTH, player.y))
    } else {
        None
    }
}
