//! Seams to the collaborators this core does not own
//!
//! The map/grid service, the technology tree and colonies live elsewhere.
//! The combat core only sees them through these traits.

use std::collections::HashSet;

use ahash::AHashSet;

use crate::core::types::{FactionId, LocationId};

/// Technology unlock state, consulted before installing gated modules
pub trait TechUnlocks {
    fn is_unlocked(&self, tech: &str) -> bool;
}

impl TechUnlocks for HashSet<String> {
    fn is_unlocked(&self, tech: &str) -> bool {
        self.contains(tech)
    }
}

impl TechUnlocks for AHashSet<String> {
    fn is_unlocked(&self, tech: &str) -> bool {
        self.contains(tech)
    }
}

/// Everything is researched. Handy for sandbox designs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllUnlocked;

impl TechUnlocks for AllUnlocked {
    fn is_unlocked(&self, _tech: &str) -> bool {
        true
    }
}

/// Nothing beyond tech level 1 is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingUnlocked;

impl TechUnlocks for NothingUnlocked {
    fn is_unlocked(&self, _tech: &str) -> bool {
        false
    }
}

/// Map and intel queries used to pick mission destinations and to move
///
/// Returning `None` means "no suitable location"; the fleet then stays put.
pub trait MapIntel {
    fn patrol_target(&self, from: LocationId, faction: FactionId) -> Option<LocationId>;
    fn exploration_target(&self, from: LocationId, faction: FactionId) -> Option<LocationId>;
    fn defense_target(&self, from: LocationId, faction: FactionId) -> Option<LocationId>;
    fn attack_target(&self, from: LocationId, faction: FactionId) -> Option<LocationId>;
    fn retreat_target(&self, from: LocationId, faction: FactionId) -> Option<LocationId>;

    /// Next location on the way from `from` to `to`
    fn next_step(&self, from: LocationId, to: LocationId) -> Option<LocationId>;
}

/// A defended ground target: colony, station, outpost
pub trait Installation {
    fn faction(&self) -> FactionId;
    fn current_health(&self) -> f32;
    fn max_health(&self) -> f32;
    /// Apply damage, returning the amount actually absorbed
    fn take_damage(&mut self, amount: f32) -> f32;
    fn defense_strength(&self) -> f32;

    fn is_destroyed(&self) -> bool {
        self.current_health() <= 0.0
    }

    fn health_percentage(&self) -> f32 {
        if self.max_health() <= 0.0 {
            return 0.0;
        }
        self.current_health() / self.max_health() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashset_unlocks() {
        let mut unlocked = HashSet::new();
        unlocked.insert("plasma_physics".to_string());
        assert!(unlocked.is_unlocked("plasma_physics"));
        assert!(!unlocked.is_unlocked("antimatter"));
    }

    #[test]
    fn test_blanket_unlocks() {
        assert!(AllUnlocked.is_unlocked("anything"));
        assert!(!NothingUnlocked.is_unlocked("anything"));
    }
}
