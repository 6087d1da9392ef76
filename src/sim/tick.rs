//! Fixed timestep simulation tick
//!
//! Core game loop that advances one session by exactly one frame.

use super::collision::{obstacle_box, resolve_push};
use super::state::{GameEvent, GamePhase, Session};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub throttle: bool,
    pub brake: bool,
    /// Only honoured while crashed
    pub respawn: bool,
    /// Ends the session from any phase
    pub quit: bool,
}

/// Advance the session by one frame and report what happened
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        if !session.is_over() {
            session.quit();
            events.push(GameEvent::Quit);
        }
        return events;
    }

    match session.phase {
        GamePhase::SessionEnded => return events,
        GamePhase::Crashed => {
            if input.respawn && session.respawn() {
                events.push(GameEvent::Respawned);
            }
            return events;
        }
        GamePhase::Driving => {}
    }

    let road = session.road;
    let player = &mut session.player;

    // Steering
    let turning = player.steer(input.steer_left, input.steer_right, &road);

    // Throttle
    if input.throttle {
        let starting = player.below_nominal();
        player.throttle();
        if starting && !player.engine_running {
            player.engine_running = true;
            events.push(GameEvent::EngineStarted);
        }
    } else if player.engine_running {
        player.engine_running = false;
        events.push(GameEvent::EngineStopped);
    }

    // Brake
    if input.brake {
        player.brake();
        if !player.braking {
            events.push(GameEvent::Braking);
        }
        player.braking = true;
    } else {
        if player.braking && player.speed > 0.0 {
            events.push(GameEvent::BrakeReleased);
        }
        player.braking = false;
    }

    if !turning {
        player.decay_angle();
    }

    // Collisions: each car is tested against wherever earlier pushes left the player
    for idx in 0..session.pool.len() {
        let obstacle = session.pool.obstacles[idx].pos;
        let overlapping = session.player.hitbox().intersects(&obstacle_box(obstacle));
        if !session
            .contacts
            .register(session.damage_mode, idx, overlapping)
        {
            continue;
        }

        let destroyed = session.damage.apply(session.damage_per_hit);
        events.push(GameEvent::Collision {
            obstacle: idx,
            damage: session.damage.damage,
        });

        if let Some(pos) = resolve_push(session.player.pos, obstacle) {
            session.player.pos = pos;
            session.player.clamp_x(&road);
        }
        log::debug!("Crashed! damage={}", session.damage.damage);

        if destroyed {
            session.phase = GamePhase::Crashed;
            session.crashes += 1;
            if session.player.engine_running {
                session.player.engine_running = false;
                events.push(GameEvent::EngineStopped);
            }
            events.push(GameEvent::Destroyed {
                damage: session.damage.damage,
            });
            log::info!(
                "Car is destroyed! frame={} crashes={}",
                session.frame,
                session.crashes
            );
            return events;
        }
        session.player.speed = 0.0;
    }

    // Traffic
    let speed = session.player.speed;
    let (pool, road, rng) = session.pool_and_rng();
    let recycled = pool.advance(speed, road, rng);
    for idx in recycled {
        session.contacts.forget(idx);
    }

    session.frame += 1;
    events
}
