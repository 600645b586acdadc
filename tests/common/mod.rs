//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use starfleet_combat::core::{FactionId, LocationId};
use starfleet_combat::design::{HullClass, ShipDesign};
use starfleet_combat::fleet::Fleet;
use starfleet_combat::modules::{Module, ModuleCatalog, ModuleKind, WeaponCategory, WeaponSpec};
use starfleet_combat::services::{AllUnlocked, MapIntel};

/// Weapon whose sustained output equals `damage` at full readiness
pub fn test_cannon(damage: f32) -> Module {
    Module::new(
        "Test Cannon",
        10,
        ModuleKind::Weapon(WeaponSpec {
            category: WeaponCategory::MassDriver,
            damage,
            fire_rate: 1.0,
            range: 100.0,
            accuracy: 100.0,
            armor_penetration: 0.0,
            tracking_speed: 100.0,
            ammo: None,
        }),
    )
}

/// Corvette hull with one cannon and no power draw
pub fn gunship(damage: f32) -> Arc<ShipDesign> {
    let mut design = ShipDesign::new("Gunship", HullClass::Corvette);
    design.add_module(test_cannon(damage), &AllUnlocked).unwrap();
    Arc::new(design)
}

/// Unarmed hull with exact hit points and armor
pub fn hulk(hit_points: f32, armor: f32) -> Arc<ShipDesign> {
    let mut base = HullClass::Cruiser.base_stats();
    base.hit_points = hit_points;
    base.armor = armor;
    Arc::new(ShipDesign::with_base_stats("Hulk", HullClass::Cruiser, base))
}

/// Evasion-free duelist used for symmetric skirmishes
pub fn duelist() -> Arc<ShipDesign> {
    let mut base = HullClass::Frigate.base_stats();
    base.evasion = 0.0;
    let mut design = ShipDesign::with_base_stats("Duelist", HullClass::Frigate, base);
    let catalog = ModuleCatalog::standard();
    for name in ["Chemical Thruster", "Fission Reactor", "Pulse Laser", "Composite Armor"] {
        design
            .add_module(catalog.instantiate(name).unwrap(), &AllUnlocked)
            .unwrap();
    }
    Arc::new(design)
}

pub fn fleet_of(design: &Arc<ShipDesign>, count: usize, faction: u32) -> Fleet {
    let mut fleet = Fleet::new(format!("Fleet {}", faction), FactionId(faction), LocationId(0));
    for i in 0..count {
        fleet.commission(design, format!("{} {}", design.name, i + 1)).unwrap();
    }
    fleet
}

/// Ring of `size` locations; every mission target is two steps ahead
pub struct Ring {
    pub size: u32,
}

impl Ring {
    fn ahead(&self, from: LocationId, steps: u32) -> LocationId {
        LocationId((from.0 + steps) % self.size)
    }
}

impl MapIntel for Ring {
    fn patrol_target(&self, from: LocationId, _: FactionId) -> Option<LocationId> {
        Some(self.ahead(from, 2))
    }
    fn exploration_target(&self, from: LocationId, _: FactionId) -> Option<LocationId> {
        Some(self.ahead(from, 3))
    }
    fn defense_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        Some(LocationId(0))
    }
    fn attack_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        Some(LocationId(self.size / 2))
    }
    fn retreat_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        Some(LocationId(0))
    }
    fn next_step(&self, from: LocationId, to: LocationId) -> Option<LocationId> {
        if from == to {
            Some(from)
        } else {
            Some(self.ahead(from, 1))
        }
    }
}
