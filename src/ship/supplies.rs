//! Onboard stores: food, energy cells and munitions

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::design::ship_design::ShipDesign;
use crate::modules::module::AmmoKind;

/// Turns of upkeep a freshly built ship carries
pub const ONBOARD_SUPPLY_TURNS: f32 = 20.0;

/// Outcome of one turn of consumption
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyDraw {
    /// Share of the food need that was met (0-1)
    pub food_ratio: f32,
    /// Share of the energy need that was met (0-1)
    pub energy_ratio: f32,
}

impl SupplyDraw {
    pub fn food_shortage(&self) -> bool {
        self.food_ratio < 1.0
    }

    pub fn energy_shortage(&self) -> bool {
        self.energy_ratio < 1.0
    }
}

/// Food and energy held aboard one ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSupplies {
    pub food: f32,
    pub energy: f32,
    pub max_food: f32,
    pub max_energy: f32,
}

impl ShipSupplies {
    pub fn new(max_food: f32, max_energy: f32) -> Self {
        Self {
            food: max_food,
            energy: max_energy,
            max_food,
            max_energy,
        }
    }

    /// Full stores sized for the design's crew and power draw
    pub fn for_design(design: &ShipDesign, food_per_crew: f32, energy_per_power: f32) -> Self {
        let food = design.stats().crew_capacity as f32 * food_per_crew * ONBOARD_SUPPLY_TURNS;
        let energy = design.power_draw() * energy_per_power * ONBOARD_SUPPLY_TURNS;
        Self::new(food, energy)
    }

    /// Take what is needed, or whatever is left
    pub fn consume(&mut self, food_needed: f32, energy_needed: f32) -> SupplyDraw {
        SupplyDraw {
            food_ratio: draw(&mut self.food, food_needed),
            energy_ratio: draw(&mut self.energy, energy_needed),
        }
    }

    /// Add stores up to capacity, returning what was actually loaded
    pub fn resupply(&mut self, food: f32, energy: f32) -> (f32, f32) {
        let food_loaded = food.max(0.0).min(self.max_food - self.food);
        let energy_loaded = energy.max(0.0).min(self.max_energy - self.energy);
        self.food += food_loaded;
        self.energy += energy_loaded;
        (food_loaded, energy_loaded)
    }

    pub fn food_ratio(&self) -> f32 {
        if self.max_food <= 0.0 {
            return 1.0;
        }
        (self.food / self.max_food).clamp(0.0, 1.0)
    }
}

fn draw(store: &mut f32, needed: f32) -> f32 {
    if needed <= 0.0 {
        return 1.0;
    }
    if *store >= needed {
        *store -= needed;
        1.0
    } else {
        let ratio = (*store / needed).max(0.0);
        *store = 0.0;
        ratio
    }
}

/// Munitions per kind, sized from the weapons a design carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Magazines {
    rounds: AHashMap<AmmoKind, u32>,
    capacity: AHashMap<AmmoKind, u32>,
}

impl Magazines {
    /// Full magazines for every ammunition-fed weapon on the design
    pub fn for_design(design: &ShipDesign) -> Self {
        let mut capacity: AHashMap<AmmoKind, u32> = AHashMap::new();
        for (_, weapon) in design.weapons() {
            if let Some(ammo) = &weapon.ammo {
                *capacity.entry(ammo.kind).or_insert(0) += ammo.capacity;
            }
        }
        Self {
            rounds: capacity.clone(),
            capacity,
        }
    }

    pub fn rounds(&self, kind: AmmoKind) -> u32 {
        self.rounds.get(&kind).copied().unwrap_or(0)
    }

    pub fn capacity(&self, kind: AmmoKind) -> u32 {
        self.capacity.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: AmmoKind, amount: u32) -> bool {
        self.rounds(kind) >= amount
    }

    /// Spend rounds if enough are left
    pub fn take(&mut self, kind: AmmoKind, amount: u32) -> bool {
        match self.rounds.get_mut(&kind) {
            Some(left) if *left >= amount => {
                *left -= amount;
                true
            }
            _ => amount == 0,
        }
    }

    /// Refill every magazine to capacity
    pub fn refill(&mut self) {
        self.rounds = self.capacity.clone();
    }
}
