//! Construction and maintenance costs

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;

/// Amount of each resource kind. Used for both one-off construction cost and
/// per-turn maintenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceCost {
    pub metal: f32,
    pub energy: f32,
    pub crystal: f32,
    pub credits: f32,
}

impl ResourceCost {
    pub fn new(metal: f32, energy: f32, crystal: f32, credits: f32) -> Self {
        Self {
            metal,
            energy,
            crystal,
            credits,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::Metal => self.metal,
            ResourceKind::Energy => self.energy,
            ResourceKind::Crystal => self.crystal,
            ResourceKind::Credits => self.credits,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: f32) {
        match kind {
            ResourceKind::Metal => self.metal += amount,
            ResourceKind::Energy => self.energy += amount,
            ResourceKind::Crystal => self.crystal += amount,
            ResourceKind::Credits => self.credits += amount,
        }
    }

    /// Sum across every resource kind
    pub fn total(&self) -> f32 {
        ResourceKind::all().iter().map(|k| self.get(*k)).sum()
    }

    /// Non-zero entries, in `ResourceKind::all()` order
    pub fn entries(&self) -> Vec<(ResourceKind, f32)> {
        ResourceKind::all()
            .iter()
            .map(|k| (*k, self.get(*k)))
            .filter(|(_, amount)| *amount != 0.0)
            .collect()
    }
}

impl std::ops::Add for ResourceCost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            metal: self.metal + rhs.metal,
            energy: self.energy + rhs.energy,
            crystal: self.crystal + rhs.crystal,
            credits: self.credits + rhs.credits,
        }
    }
}

impl std::ops::AddAssign for ResourceCost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for ResourceCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, cost| acc + cost)
    }
}
