//! Fleet-level stores shared by every ship in the fleet
//!
//! Ships carry their own onboard supplies; the fleet train covers what the
//! formation as a whole burns. Running dry costs morale, readiness or movement.

use serde::{Deserialize, Serialize};

/// Food per crew member per turn
pub const FLEET_FOOD_PER_CREW: f32 = 0.05;

/// Energy per unit of power draw per turn
pub const FLEET_ENERGY_PER_POWER: f32 = 0.02;

/// Morale lost by every ship when the fleet cannot feed its crews
pub const FLEET_FOOD_SHORTAGE_MORALE_PENALTY: f32 = 5.0;

/// Readiness lost by every ship when the fleet runs out of energy
pub const FLEET_ENERGY_SHORTAGE_READINESS_PENALTY: f32 = 5.0;

/// Starting stores of a new fleet
pub const BASE_FLEET_FOOD: f32 = 500.0;
pub const BASE_FLEET_ENERGY: f32 = 500.0;
pub const BASE_FLEET_FUEL: f32 = 1000.0;

/// Which needs went unmet this turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyShortage {
    pub food: bool,
    pub energy: bool,
    pub fuel: bool,
}

impl SupplyShortage {
    pub fn any(&self) -> bool {
        self.food || self.energy || self.fuel
    }
}

/// Food, energy and fuel held by the fleet train
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSupply {
    pub food: f32,
    pub energy: f32,
    pub fuel: f32,
    pub max_food: f32,
    pub max_energy: f32,
    pub max_fuel: f32,
}

impl Default for FleetSupply {
    fn default() -> Self {
        Self::new(BASE_FLEET_FOOD, BASE_FLEET_ENERGY, BASE_FLEET_FUEL)
    }
}

impl FleetSupply {
    /// Full stores with the given capacities
    pub fn new(max_food: f32, max_energy: f32, max_fuel: f32) -> Self {
        Self {
            food: max_food,
            energy: max_energy,
            fuel: max_fuel,
            max_food,
            max_energy,
            max_fuel,
        }
    }

    /// Empty stores with the given capacities
    pub fn empty(max_food: f32, max_energy: f32, max_fuel: f32) -> Self {
        Self {
            food: 0.0,
            energy: 0.0,
            fuel: 0.0,
            max_food,
            max_energy,
            max_fuel,
        }
    }

    /// Consume one turn of needs. Partial stores are emptied and flagged.
    pub fn consume(&mut self, food: f32, energy: f32, fuel: f32) -> SupplyShortage {
        SupplyShortage {
            food: !take(&mut self.food, food),
            energy: !take(&mut self.energy, energy),
            fuel: !take(&mut self.fuel, fuel),
        }
    }

    /// Load stores up to capacity
    pub fn add(&mut self, food: f32, energy: f32, fuel: f32) {
        self.food = (self.food + food.max(0.0)).min(self.max_food);
        self.energy = (self.energy + energy.max(0.0)).min(self.max_energy);
        self.fuel = (self.fuel + fuel.max(0.0)).min(self.max_fuel);
    }

    /// Fold another fleet's stores and capacity into this one
    pub fn absorb(&mut self, other: FleetSupply) {
        self.max_food += other.max_food;
        self.max_energy += other.max_energy;
        self.max_fuel += other.max_fuel;
        self.food += other.food;
        self.energy += other.energy;
        self.fuel += other.fuel;
    }

    /// Carve off `share` (0-1) of stores and capacity
    pub fn split_off(&mut self, share: f32) -> FleetSupply {
        let share = share.clamp(0.0, 1.0);
        let part = FleetSupply {
            food: self.food * share,
            energy: self.energy * share,
            fuel: self.fuel * share,
            max_food: self.max_food * share,
            max_energy: self.max_energy * share,
            max_fuel: self.max_fuel * share,
        };
        self.food -= part.food;
        self.energy -= part.energy;
        self.fuel -= part.fuel;
        self.max_food -= part.max_food;
        self.max_energy -= part.max_energy;
        self.max_fuel -= part.max_fuel;
        part
    }

    /// Turns until food runs out at the given consumption
    pub fn turns_of_food(&self, per_turn: f32) -> f32 {
        if per_turn <= 0.0 {
            return f32::INFINITY;
        }
        self.food.max(0.0) / per_turn
    }
}

fn take(store: &mut f32, needed: f32) -> bool {
    if needed <= 0.0 {
        return true;
    }
    if *store >= needed {
        *store -= needed;
        true
    } else {
        *store = 0.0;
        false
    }
}
