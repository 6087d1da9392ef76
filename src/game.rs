//! Session driver
//!
//! Runs vehicle selection, then drives one session until the player quits.
//! Crash → respawn is a transition inside the loop, never a nested call.

use crate::assets::GameResources;
use crate::audio::AudioManager;
use crate::platform::time::MENU_POLL_INTERVAL;
use crate::platform::{FramePacer, FrameView, InputSource, Presenter};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GamePhase, Session, VehicleClass, VehicleSelection, tick};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// `None` when the player quit from the menu
    pub class: Option<VehicleClass>,
    pub seed: u64,
    pub frames: u64,
    pub crashes: u32,
    pub final_damage: f32,
}

/// Top-level game: owns settings, resources and audio routing
pub struct Game {
    settings: Settings,
    resources: Option<GameResources>,
    audio: AudioManager,
}

impl Game {
    /// Settings are validated here; sessions rely on a playable road.
    pub fn new(settings: Settings, resources: GameResources) -> Result<Self, SettingsError> {
        settings.validate()?;
        let audio = AudioManager::new(&settings, resources.audio_available());
        Ok(Self {
            settings,
            resources: Some(resources),
            audio,
        })
    }

    /// Game with nothing loaded from disk; audio stays silent
    pub fn without_resources(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            resources: None,
            audio: AudioManager::disabled(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resources(&self) -> Option<&GameResources> {
        self.resources.as_ref()
    }

    fn pacer(&self, menu: bool) -> FramePacer {
        match (self.settings.fps, menu) {
            (0, _) => FramePacer::unpaced(),
            (_, true) => FramePacer::with_period(MENU_POLL_INTERVAL),
            (fps, false) => FramePacer::new(fps),
        }
    }

    /// Let the player pick a car. `None` means they quit.
    pub fn select_vehicle<I, P>(&self, input: &mut I, presenter: &mut P) -> Option<VehicleClass>
    where
        I: InputSource,
        P: Presenter,
    {
        let names = VehicleSelection::names();
        let mut selection = VehicleSelection::new();
        let mut pacer = self.pacer(true);
        loop {
            presenter.render_menu(&names, selection.index());
            let menu_input = input.poll_menu(&selection);
            if menu_input.quit {
                log::info!("Quit from vehicle selection");
                return None;
            }
            if let Some(class) = selection.step(&menu_input) {
                log::info!("Selected vehicle: {}", class);
                return Some(class);
            }
            pacer.wait();
        }
    }

    /// Drive a session until it ends
    pub fn drive<I, P>(&mut self, session: &mut Session, input: &mut I, presenter: &mut P)
    where
        I: InputSource,
        P: Presenter,
    {
        let mut pacer = self.pacer(false);
        while !session.is_over() {
            let tick_input = input.poll(&FrameView::of(session));
            let events = tick(session, &tick_input);
            for event in &events {
                if let Some(playback) = self.audio.handle(event) {
                    presenter.play(&playback);
                }
            }

            let view = FrameView::of(session);
            match session.phase {
                GamePhase::Driving => presenter.render_frame(&view),
                GamePhase::Crashed => presenter.render_crash_overlay(&view),
                GamePhase::SessionEnded => break,
            }
            pacer.wait();
        }
    }

    /// Menu, then one session with as many respawns as the player wants
    pub fn run<I, P>(&mut self, input: &mut I, presenter: &mut P) -> RunSummary
    where
        I: InputSource,
        P: Presenter,
    {
        let seed = self.settings.resolve_seed();
        let Some(class) = self.select_vehicle(input, presenter) else {
            return RunSummary {
                class: None,
                seed,
                frames: 0,
                crashes: 0,
                final_damage: 0.0,
            };
        };

        let mut session = Session::new(class, seed, &self.settings);
        self.drive(&mut session, input, presenter);

        RunSummary {
            class: Some(class),
            seed,
            frames: session.frame,
            crashes: session.crashes,
            final_damage: session.damage.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LogPresenter, ScriptedInput};
    use crate::sim::{MenuInput, TickInput};

    fn unpaced() -> Settings {
        Settings {
            fps: 0,
            seed: Some(99),
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_from_menu() {
        let mut game = Game::without_resources(unpaced()).unwrap();
        let mut input = ScriptedInput::default();
        let mut presenter = LogPresenter::new(0);
        let summary = game.run(&mut input, &mut presenter);
        assert_eq!(summary.class, None);
        assert_eq!(presenter.menus_rendered, 1);
    }

    #[test]
    fn test_select_then_drive_then_quit() {
        let mut game = Game::without_resources(unpaced()).unwrap();
        let menu = vec![
            MenuInput {
                left: true,
                ..Default::default()
            },
            MenuInput {
                confirm: true,
                ..Default::default()
            },
        ];
        let mut input = ScriptedInput::new(menu, Vec::new()).hold(TickInput::default(), 3);
        let mut presenter = LogPresenter::new(0);
        let summary = game.run(&mut input, &mut presenter);
        assert_eq!(summary.class, Some(VehicleClass::Slow));
        assert_eq!(summary.seed, 99);
        assert!(summary.frames <= 3);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_unplayable_settings_are_rejected() {
        let settings = Settings {
            screen_height: 0.0,
            ..unpaced()
        };
        assert!(matches!(
            Game::without_resources(settings),
            Err(SettingsError::Invalid(_))
        ));
    }
}
