//! Damage packets and armor mitigation

use serde::{Deserialize, Serialize};

use crate::ship::constants::MIN_DAMAGE_FRACTION;

/// Damage families, mapped from weapon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Energy,
    Kinetic,
    Explosive,
}

/// A single hit on its way to a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub amount: f32,
    pub damage_type: DamageType,
    /// 0-100, share of the target's armor ignored
    pub armor_penetration: f32,
}

impl Damage {
    pub fn new(amount: f32, damage_type: DamageType, armor_penetration: f32) -> Self {
        Self {
            amount,
            damage_type,
            armor_penetration,
        }
    }

    /// Damage left after armor mitigation
    ///
    /// At least 10% of the hit always gets through. Full penetration ignores
    /// armor entirely.
    pub fn effective_against(&self, armor: f32) -> f32 {
        let penetration = self.armor_penetration.clamp(0.0, 100.0) / 100.0;
        let mitigated = self.amount - armor.max(0.0) * (1.0 - penetration);
        mitigated.max(self.amount * MIN_DAMAGE_FRACTION)
    }
}
