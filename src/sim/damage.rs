//! Damage accounting

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How long contact with one traffic car keeps hurting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamageMode {
    /// Every frame of overlap deals damage
    #[default]
    PerFrame,
    /// Damage once when contact begins; again only after separating
    PerContact,
}

/// Accumulated damage against a fixed ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageState {
    pub damage: f32,
    pub max_damage: f32,
}

impl DamageState {
    pub fn new(max_damage: f32) -> Self {
        Self {
            damage: 0.0,
            max_damage,
        }
    }

    /// Add damage, saturating at the ceiling. Returns true once destroyed.
    pub fn apply(&mut self, amount: f32) -> bool {
        self.damage = (self.damage + amount.max(0.0)).min(self.max_damage);
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.damage >= self.max_damage
    }

    /// Fill fraction for the damage bar (0.0 - 1.0)
    pub fn ratio(&self) -> f32 {
        if self.max_damage > 0.0 {
            (self.damage / self.max_damage).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.damage = 0.0;
    }
}

/// Traffic cars currently in contact with the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSet {
    touching: BTreeSet<usize>,
}

impl ContactSet {
    /// Record whether car `idx` overlaps the player right now.
    /// Returns true when that overlap should deal damage.
    pub fn register(&mut self, mode: DamageMode, idx: usize, overlapping: bool) -> bool {
        if !overlapping {
            self.touching.remove(&idx);
            return false;
        }
        let new_contact = self.touching.insert(idx);
        match mode {
            DamageMode::PerFrame => true,
            DamageMode::PerContact => new_contact,
        }
    }

    /// Forget a car (it was recycled to a new lane)
    pub fn forget(&mut self, idx: usize) {
        self.touching.remove(&idx);
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_saturates() {
        let mut d = DamageState::new(10.0);
        assert!(!d.apply(4.0));
        assert!(!d.apply(4.0));
        assert!(d.apply(4.0));
        assert_eq!(d.damage, 10.0);
        assert_eq!(d.ratio(), 1.0);
        d.reset();
        assert_eq!(d.damage, 0.0);
        assert!(!d.is_destroyed());
    }

    #[test]
    fn test_exact_ceiling_destroys() {
        let mut d = DamageState::new(800.0);
        d.damage = 798.0;
        assert!(d.apply(2.0));
        assert_eq!(d.damage, 800.0);
    }

    #[test]
    fn test_per_frame_repeats() {
        let mut contacts = ContactSet::default();
        assert!(contacts.register(DamageMode::PerFrame, 1, true));
        assert!(contacts.register(DamageMode::PerFrame, 1, true));
        assert!(!contacts.register(DamageMode::PerFrame, 1, false));
    }

    #[test]
    fn test_per_contact_dedups_until_separated() {
        let mut contacts = ContactSet::default();
        assert!(contacts.register(DamageMode::PerContact, 0, true));
        assert!(contacts.register(DamageMode::PerContact, 2, true));
        assert!(!contacts.register(DamageMode::PerContact, 0, true));
        assert!(!contacts.register(DamageMode::PerContact, 2, true));

        // Car 0 separates, then touches again
        assert!(!contacts.register(DamageMode::PerContact, 0, false));
        assert!(contacts.register(DamageMode::PerContact, 0, true));

        // Recycled cars start fresh
        contacts.forget(2);
        assert!(contacts.register(DamageMode::PerContact, 2, true));
    }
}
