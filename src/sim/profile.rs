//! Vehicle catalogue and the selection menu cursor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::OVERDRIVE_HEADROOM;
use crate::to_nominal_speed;

/// Selectable car classes, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleClass {
    #[default]
    Fast,
    Medium,
    Slow,
}

impl VehicleClass {
    /// Every class in menu order
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Fast, VehicleClass::Medium, VehicleClass::Slow];

    pub fn name(&self) -> &'static str {
        match self {
            VehicleClass::Fast => "Fast",
            VehicleClass::Medium => "Medium",
            VehicleClass::Slow => "Slow",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            VehicleClass::Fast => 0,
            VehicleClass::Medium => 1,
            VehicleClass::Slow => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn profile(&self) -> &'static VehicleProfile {
        &PROFILES[self.index()]
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(VehicleClass::Fast),
            "medium" | "med" => Ok(VehicleClass::Medium),
            "slow" => Ok(VehicleClass::Slow),
            other => Err(format!("unknown vehicle class: {other}")),
        }
    }
}

/// Handling figures for one car class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    pub name: &'static str,
    /// Catalogue top speed in km/h
    pub top_speed_kmh: f32,
    /// Speed gained per throttle frame below nominal top speed
    pub acceleration: f32,
    /// Horizontal pixels per steering frame
    pub steering_speed: f32,
}

static PROFILES: [VehicleProfile; 3] = [
    VehicleProfile {
        name: "Fast",
        top_speed_kmh: 399.117,
        acceleration: 0.49,
        steering_speed: 8.0,
    },
    VehicleProfile {
        name: "Medium",
        top_speed_kmh: 350.0,
        acceleration: 0.11,
        steering_speed: 9.0,
    },
    VehicleProfile {
        name: "Slow",
        top_speed_kmh: 300.0,
        acceleration: 0.13,
        steering_speed: 10.0,
    },
];

impl VehicleProfile {
    /// Ceiling of the linear acceleration phase, in sim units
    pub fn nominal_top_speed(&self) -> f32 {
        to_nominal_speed(self.top_speed_kmh)
    }

    /// Overdrive ceiling reached by slow creep past nominal
    pub fn boosted_top_speed(&self) -> f32 {
        self.nominal_top_speed() + OVERDRIVE_HEADROOM
    }
}

/// Menu input for one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuInput {
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub quit: bool,
}

/// Cyclic cursor over [`VehicleClass::ALL`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VehicleSelection {
    index: usize,
}

impl VehicleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn highlighted(&self) -> VehicleClass {
        VehicleClass::from_index(self.index)
    }

    /// Apply one poll of menu input; returns the class once confirmed
    pub fn step(&mut self, input: &MenuInput) -> Option<VehicleClass> {
        let len = VehicleClass::ALL.len();
        if input.left {
            self.index = (self.index + len - 1) % len;
        }
        if input.right {
            self.index = (self.index + 1) % len;
        }
        input.confirm.then(|| self.highlighted())
    }

    /// Names in menu order
    pub fn names() -> [&'static str; 3] {
        VehicleClass::ALL.map(|c| c.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_positive() {
        for class in VehicleClass::ALL {
            let p = class.profile();
            assert_eq!(p.name, class.name());
            assert!(p.top_speed_kmh > 0.0);
            assert!(p.acceleration > 0.0);
            assert!(p.boosted_top_speed() > p.nominal_top_speed());
        }
    }

    #[test]
    fn test_fast_nominal_speed() {
        let p = VehicleClass::Fast.profile();
        assert!((p.nominal_top_speed() - 111.3297).abs() < 0.001);
        assert!((p.boosted_top_speed() - (111.3297 + 11.1111)).abs() < 0.001);
    }

    #[test]
    fn test_selection_wraps_left() {
        let mut sel = VehicleSelection::new();
        let left = MenuInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(sel.step(&left), None);
        assert_eq!(sel.highlighted(), VehicleClass::Slow);
        sel.step(&left);
        assert_eq!(sel.highlighted(), VehicleClass::Medium);
    }

    #[test]
    fn test_selection_wraps_right_and_confirms() {
        let mut sel = VehicleSelection::new();
        let right = MenuInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..4 {
            sel.step(&right);
        }
        assert_eq!(sel.index(), 1);
        let confirm = MenuInput {
            confirm: true,
            ..Default::default()
        };
        assert_eq!(sel.step(&confirm), Some(VehicleClass::Medium));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("FAST".parse::<VehicleClass>(), Ok(VehicleClass::Fast));
        assert_eq!("med".parse::<VehicleClass>(), Ok(VehicleClass::Medium));
        assert!("turbo".parse::<VehicleClass>().is_err());
    }
}
