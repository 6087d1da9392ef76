//! Retro Racer entry point
//!
//! Loads settings and resources, then runs a headless autopilot session
//! through the log presenter. A windowed presenter plugs in through the
//! same `InputSource`/`Presenter` traits.

use std::process::ExitCode;

use retro_racer::platform::{Autopilot, LogPresenter};
use retro_racer::{Game, GameResources, Settings};

/// Environment variable naming an optional JSON settings file
const CONFIG_ENV: &str = "RETRO_RACER_CONFIG";

fn load_settings() -> Settings {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Settings::default()
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Retro Racer starting...");

    let settings = load_settings();

    let resources = match GameResources::load(&settings.assets) {
        Ok(resources) => resources,
        Err(e) => {
            log::error!("Failed to load images: {e}");
            eprintln!("Failed to load images: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut input = Autopilot::new(&settings.headless);
    let mut presenter = LogPresenter::new(settings.headless.log_every);
    let mut game = match Game::new(settings, resources) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let summary = game.run(&mut input, &mut presenter);

    log::info!(
        "Run finished: vehicle={} seed={} frames={} crashes={} damage={:.0}",
        summary.class.map(|c| c.name()).unwrap_or("none"),
        summary.seed,
        summary.frames,
        summary.crashes,
        summary.final_damage
    );
    ExitCode::SUCCESS
}
