//! Input sources

use std::collections::VecDeque;

use super::FrameView;
use crate::sim::{MenuInput, TickInput, VehicleSelection};

/// Polled key state, once per frame
pub trait InputSource {
    /// Keys for the vehicle selection menu
    fn poll_menu(&mut self, selection: &VehicleSelection) -> MenuInput;

    /// Keys for a driving or crashed frame
    fn poll(&mut self, frame: &FrameView<'_>) -> TickInput;
}

/// Replays a fixed list of inputs, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    menu: VecDeque<MenuInput>,
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(menu: Vec<MenuInput>, frames: Vec<TickInput>) -> Self {
        Self {
            menu: menu.into(),
            frames: frames.into(),
        }
    }

    /// Hold the same input for `count` frames
    pub fn hold(mut self, input: TickInput, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_menu(&mut self, _selection: &VehicleSelection) -> MenuInput {
        self.menu.pop_front().unwrap_or(MenuInput {
            quit: true,
            ..Default::default()
        })
    }

    fn poll(&mut self, _frame: &FrameView<'_>) -> TickInput {
        self.frames.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}
