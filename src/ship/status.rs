//! Per-module condition on a live ship
//!
//! Lifecycle: Active -> Suppressed (integrity < 30) -> Destroyed (integrity 0).
//! Repair walks back up: above 30 the module is active again, above 50 a
//! destroyed module counts as rebuilt.

use serde::{Deserialize, Serialize};

use crate::ship::constants::{MODULE_RESTORE_THRESHOLD, MODULE_SUPPRESSION_THRESHOLD};

/// Coarse module state derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleState {
    Active,
    Suppressed,
    Destroyed,
}

/// Condition of one installed module, bound by slot index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub module_index: usize,
    /// 0-100
    pub integrity: f32,
    pub active: bool,
    pub destroyed: bool,
}

impl ModuleStatus {
    pub fn new(module_index: usize) -> Self {
        Self {
            module_index,
            integrity: 100.0,
            active: true,
            destroyed: false,
        }
    }

    pub fn damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.integrity = (self.integrity - amount).max(0.0);
        if self.integrity < MODULE_SUPPRESSION_THRESHOLD {
            self.active = false;
        }
        if self.integrity <= 0.0 {
            self.destroyed = true;
        }
    }

    pub fn repair(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.integrity = (self.integrity + amount).min(100.0);
        if self.integrity > MODULE_RESTORE_THRESHOLD {
            self.destroyed = false;
        }
        if self.integrity > MODULE_SUPPRESSION_THRESHOLD && !self.destroyed {
            self.active = true;
        }
    }

    /// 0 when suppressed or destroyed, else integrity as a fraction
    pub fn effectiveness(&self) -> f32 {
        if !self.active || self.destroyed {
            0.0
        } else {
            self.integrity / 100.0
        }
    }

    pub fn state(&self) -> ModuleState {
        if self.destroyed {
            ModuleState::Destroyed
        } else if self.active {
            ModuleState::Active
        } else {
            ModuleState::Suppressed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_module_is_fully_effective() {
        let status = ModuleStatus::new(0);
        assert_eq!(status.effectiveness(), 1.0);
        assert_eq!(status.state(), ModuleState::Active);
    }

    #[test]
    fn test_suppression_below_threshold() {
        let mut status = ModuleStatus::new(2);
        status.damage(75.0);
        assert_eq!(status.state(), ModuleState::Suppressed);
        assert_eq!(status.effectiveness(), 0.0);

        status.repair(10.0);
        assert_eq!(status.integrity, 35.0);
        assert_eq!(status.state(), ModuleState::Active);
        assert!((status.effectiveness() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_destroyed_needs_restore_threshold() {
        let mut status = ModuleStatus::new(1);
        status.damage(250.0);
        assert_eq!(status.integrity, 0.0);
        assert_eq!(status.state(), ModuleState::Destroyed);

        status.repair(40.0);
        assert_eq!(status.state(), ModuleState::Destroyed);
        assert_eq!(status.effectiveness(), 0.0);

        status.repair(15.0);
        assert_eq!(status.state(), ModuleState::Active);
    }

    #[test]
    fn test_repair_caps_at_full() {
        let mut status = ModuleStatus::new(0);
        status.damage(10.0);
        status.repair(50.0);
        assert_eq!(status.integrity, 100.0);
    }
}
