//! End-to-end driving scenarios through the public API

use glam::Vec2;
use retro_racer::platform::{Autopilot, LogPresenter, ScriptedInput};
use retro_racer::settings::HeadlessSettings;
use retro_racer::sim::{
    GameEvent, GamePhase, MenuInput, Obstacle, Session, TickInput, VehicleClass, tick,
};
use retro_racer::{Game, Settings};

fn session(class: VehicleClass) -> Session {
    Session::new(class, 2024, &Settings::default())
}

#[test]
fn fast_car_ten_frames_of_throttle() {
    let mut s = session(VehicleClass::Fast);
    s.pool.obstacles.clear();
    let throttle = TickInput {
        throttle: true,
        ..Default::default()
    };
    for _ in 0..10 {
        tick(&mut s, &throttle);
    }
    let expected = (10.0f32 * 0.49).min(399.117 * 1000.0 / 3585.0);
    assert!((s.player.speed - expected).abs() < 1e-4);
    assert_eq!(s.player.speed_kmh(), 17);
}

#[test]
fn lane_centred_head_on_for_five_frames() {
    let mut s = session(VehicleClass::Fast);
    assert_eq!(s.player.pos.x, 370.0);
    s.pool.obstacles = vec![Obstacle {
        pos: Vec2::new(370.0, 615.0),
    }];
    let throttle = TickInput {
        throttle: true,
        ..Default::default()
    };
    for _ in 0..5 {
        tick(&mut s, &throttle);
        assert_eq!(s.player.speed, 0.0);
    }
    assert_eq!(s.damage.damage, 10.0);
    assert_eq!(s.phase, GamePhase::Driving);
}

#[test]
fn reaching_max_damage_crashes_and_respawn_restores() {
    let mut s = session(VehicleClass::Medium);
    let mut frames = 0;
    while s.phase == GamePhase::Driving {
        // Pin a traffic car straight ahead so every frame is a hit
        s.pool.obstacles = vec![Obstacle {
            pos: Vec2::new(370.0, 620.0),
        }];
        tick(&mut s, &TickInput::default());
        frames += 1;
        assert!(s.damage.damage <= s.damage.max_damage);
    }
    assert_eq!(frames, 400);
    assert_eq!(s.damage.damage, 800.0);
    assert_eq!(s.phase, GamePhase::Crashed);

    let events = tick(
        &mut s,
        &TickInput {
            respawn: true,
            ..Default::default()
        },
    );
    assert_eq!(events, vec![GameEvent::Respawned]);
    assert_eq!(s.damage.damage, 0.0);
    assert_eq!(s.phase, GamePhase::Driving);
    assert_eq!(s.class(), VehicleClass::Medium);
}

#[test]
fn many_respawns_do_not_nest() {
    let mut s = session(VehicleClass::Slow);
    let respawn = TickInput {
        respawn: true,
        ..Default::default()
    };
    for _ in 0..10_000 {
        s.damage.damage = s.damage.max_damage - 2.0;
        s.pool.obstacles[0].pos = Vec2::new(s.player.pos.x, s.player.pos.y - 60.0);
        tick(&mut s, &TickInput::default());
        assert_eq!(s.phase, GamePhase::Crashed);
        tick(&mut s, &respawn);
        assert_eq!(s.phase, GamePhase::Driving);
    }
    assert_eq!(s.crashes, 10_000);
}

#[test]
fn scripted_game_runs_until_input_ends() {
    let settings = Settings {
        fps: 0,
        seed: Some(5),
        max_damage: 4.0,
        ..Default::default()
    };
    let mut game = Game::without_resources(settings).unwrap();
    let menu = vec![MenuInput {
        confirm: true,
        ..Default::default()
    }];
    // Sit still until the script runs out, then the script quits
    let mut input = ScriptedInput::new(menu, Vec::new()).hold(TickInput::default(), 5_000);
    let mut presenter = LogPresenter::new(0);
    let summary = game.run(&mut input, &mut presenter);
    assert_eq!(summary.class, Some(VehicleClass::Fast));
    assert!(summary.final_damage <= 4.0);
    assert!(presenter.frames_rendered > 0);
}

#[test]
fn autopilot_runs_are_reproducible() {
    let settings = Settings {
        fps: 0,
        seed: Some(31337),
        headless: HeadlessSettings {
            vehicle: VehicleClass::Slow,
            max_respawns: 2,
            max_frames: 3_000,
            log_every: 0,
        },
        ..Default::default()
    };

    let run = |settings: &Settings| {
        let mut game = Game::without_resources(settings.clone()).unwrap();
        let mut input = Autopilot::new(&settings.headless);
        let mut presenter = LogPresenter::new(0);
        let summary = game.run(&mut input, &mut presenter);
        (summary, presenter.frames_rendered, input.respawns())
    };

    let (a, frames_a, respawns_a) = run(&settings);
    let (b, frames_b, respawns_b) = run(&settings);
    assert_eq!(a, b);
    assert_eq!(frames_a, frames_b);
    assert_eq!(respawns_a, respawns_b);
    assert_eq!(a.class, Some(VehicleClass::Slow));
    assert!(a.crashes <= 3);
}
