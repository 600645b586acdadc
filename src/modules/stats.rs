//! Additive stat contributions
//!
//! Every module variant reports what it adds to a hull as a `StatBlock`.
//! Blocks sum with `+`, so aggregation is a fold over installed modules.

use serde::{Deserialize, Serialize};

/// Additive contribution to a design's statistics. Zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub hit_points: f32,
    pub armor: f32,
    pub shield: f32,
    pub evasion: f32,
    pub engine_power: f32,
    pub warp_speed: f32,
    pub maneuverability: f32,
    pub crew_capacity: i32,
    pub cargo_capacity: i32,
    pub fuel_capacity: f32,
}

impl StatBlock {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl std::ops::Add for StatBlock {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            hit_points: self.hit_points + rhs.hit_points,
            armor: self.armor + rhs.armor,
            shield: self.shield + rhs.shield,
            evasion: self.evasion + rhs.evasion,
            engine_power: self.engine_power + rhs.engine_power,
            warp_speed: self.warp_speed + rhs.warp_speed,
            maneuverability: self.maneuverability + rhs.maneuverability,
            crew_capacity: self.crew_capacity + rhs.crew_capacity,
            cargo_capacity: self.cargo_capacity + rhs.cargo_capacity,
            fuel_capacity: self.fuel_capacity + rhs.fuel_capacity,
        }
    }
}

impl std::ops::AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for StatBlock {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, block| acc + block)
    }
}
