//! Ship designs: a hull plus installed modules, with derived totals
//!
//! Derived values (stats, space, power, cost, validity) are plain fields
//! refreshed by `recompute()` after every module change. Nothing recomputes
//! implicitly.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::DesignError;
use crate::design::cost::ResourceCost;
use crate::design::hull::{HullClass, HullStats};
use crate::modules::module::{
    DefenseSpec, HullSpec, Module, ModuleKind, ModuleVariant, WeaponSpec,
};
use crate::modules::stats::StatBlock;
use crate::services::TechUnlocks;
use crate::ship::constants::{
    MAX_EVASION, MIN_CARGO_CAPACITY, MIN_CREW_CAPACITY, MIN_FUEL_CAPACITY,
};

/// Construction surcharge per unit of hull space
pub const HULL_METAL_PER_SPACE: f32 = 0.5;
pub const HULL_ENERGY_PER_SPACE: f32 = 0.2;
/// Maintenance surcharge per unit of hull space
pub const HULL_UPKEEP_ENERGY_PER_SPACE: f32 = 0.01;

/// Final statistics of a design after module bonuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignStats {
    pub hit_points: f32,
    pub armor: f32,
    pub shield: f32,
    pub evasion: f32,
    pub engine_power: f32,
    pub warp_speed: f32,
    pub maneuverability: f32,
    pub crew_capacity: u32,
    pub cargo_capacity: u32,
    pub fuel_capacity: f32,
}

/// A reusable ship template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDesign {
    pub name: String,
    pub hull_class: HullClass,
    pub version: u32,
    base: HullStats,
    modules: Vec<Module>,

    // Derived, refreshed by recompute()
    stats: DesignStats,
    used_space: u32,
    power_output: f32,
    power_draw: f32,
    construction_cost: ResourceCost,
    maintenance_cost: ResourceCost,
    specials: AHashMap<String, f32>,
    valid: bool,
    validation_message: String,
}

impl ShipDesign {
    /// New design on a stock hull, with only the hull frame installed
    pub fn new(name: impl Into<String>, hull_class: HullClass) -> Self {
        Self::with_base_stats(name, hull_class, hull_class.base_stats())
    }

    /// New design with overridden hull base stats
    pub fn with_base_stats(name: impl Into<String>, hull_class: HullClass, base: HullStats) -> Self {
        let frame = Module::new(
            format!("{} Frame", hull_class.name()),
            0,
            ModuleKind::Hull(HullSpec::default()),
        );

        let mut design = Self {
            name: name.into(),
            hull_class,
            version: 1,
            base,
            modules: vec![frame],
            stats: DesignStats::default(),
            used_space: 0,
            power_output: 0.0,
            power_draw: 0.0,
            construction_cost: ResourceCost::default(),
            maintenance_cost: ResourceCost::default(),
            specials: AHashMap::new(),
            valid: true,
            validation_message: String::new(),
        };
        design.recompute();
        design
    }

    /// Replace the hull frame module (keeps slot 0 as the hull)
    pub fn with_frame(mut self, frame: Module) -> Self {
        if frame.variant() == ModuleVariant::Hull {
            self.modules[0] = frame;
            self.recompute();
        }
        self
    }

    // === AGGREGATION ===

    /// Rebuild every derived total from the base stats and installed modules
    pub fn recompute(&mut self) {
        let bonus: StatBlock = self.modules.iter().map(Module::stat_bonus).sum();
        let base = &self.base;

        self.stats = DesignStats {
            hit_points: base.hit_points + bonus.hit_points,
            armor: base.armor + bonus.armor,
            shield: base.shield + bonus.shield,
            evasion: (base.evasion + bonus.evasion).clamp(0.0, MAX_EVASION),
            engine_power: base.engine_power + bonus.engine_power,
            warp_speed: base.warp_speed + bonus.warp_speed,
            maneuverability: base.maneuverability + bonus.maneuverability,
            crew_capacity: (base.crew_capacity as i32 + bonus.crew_capacity)
                .max(MIN_CREW_CAPACITY as i32) as u32,
            cargo_capacity: (base.cargo_capacity as i32 + bonus.cargo_capacity)
                .max(MIN_CARGO_CAPACITY as i32) as u32,
            fuel_capacity: (base.fuel_capacity + bonus.fuel_capacity).max(MIN_FUEL_CAPACITY),
        };

        let requirements = self.modules.iter().map(Module::power_requirement);
        let (produced, drawn) = requirements.fold((0.0, 0.0), |(p, d), req: f32| {
            if req < 0.0 {
                (p - req, d)
            } else {
                (p, d + req)
            }
        });
        self.power_output = base.power_output + produced;
        self.power_draw = drawn;

        self.recompute_costs();

        self.specials.clear();
        for module in &self.modules {
            for (key, value) in module.special_abilities() {
                *self.specials.entry(key).or_insert(0.0) += value;
            }
        }

        self.validate();
    }

    fn recompute_costs(&mut self) {
        let space = self.base.hull_space as f32;

        let mut construction: ResourceCost =
            self.modules.iter().map(|m| m.construction_cost).sum();
        construction.metal += space * HULL_METAL_PER_SPACE;
        construction.energy += space * HULL_ENERGY_PER_SPACE;

        let mut maintenance: ResourceCost = self.modules.iter().map(|m| m.maintenance_cost).sum();
        maintenance.energy += space * HULL_UPKEEP_ENERGY_PER_SPACE;

        self.construction_cost = construction;
        self.maintenance_cost = maintenance;
    }

    /// Recount used hull space and refresh the validity flag and message
    pub fn validate(&mut self) -> bool {
        self.used_space = self
            .modules
            .iter()
            .filter(|m| m.variant() != ModuleVariant::Hull)
            .map(|m| m.space)
            .sum();

        let capacity = self.base.hull_space;
        if self.used_space > capacity {
            self.valid = false;
            self.validation_message = format!(
                "Hull space exceeded: {} / {} used (overloaded by {} units)",
                self.used_space,
                capacity,
                self.used_space - capacity
            );
        } else {
            self.valid = true;
            self.validation_message = if self.has_power_deficit() {
                format!(
                    "Design is valid (warning: power deficit of {:.1})",
                    -self.available_power()
                )
            } else {
                "Design is valid".to_string()
            };
        }
        self.valid
    }

    // === EDITING ===

    /// Check whether a module could be installed right now
    pub fn can_add_module(
        &self,
        module: &Module,
        unlocks: &dyn TechUnlocks,
    ) -> Result<(), DesignError> {
        if module.variant() == ModuleVariant::Hull {
            return Err(DesignError::HullAlreadyInstalled {
                module: module.name.clone(),
            });
        }

        if module.tech_level > 1 {
            if let Some(tech) = &module.required_tech {
                if !unlocks.is_unlocked(tech) {
                    return Err(DesignError::TechLocked {
                        module: module.name.clone(),
                        tech: tech.clone(),
                    });
                }
            }
        }

        let after = self.used_space + module.space;
        if after > self.base.hull_space {
            return Err(DesignError::InsufficientSpace {
                module: module.name.clone(),
                required: module.space,
                overload: after - self.base.hull_space,
            });
        }

        Ok(())
    }

    /// Install a module, returning its slot index
    ///
    /// On refusal the design is unchanged apart from the validation message,
    /// which records why.
    pub fn add_module(
        &mut self,
        module: Module,
        unlocks: &dyn TechUnlocks,
    ) -> Result<usize, DesignError> {
        if let Err(err) = self.can_add_module(&module, unlocks) {
            tracing::debug!("Design '{}' refused {}: {}", self.name, module.name, err);
            self.validation_message = format!("Cannot install {}: {}", module.name, err);
            return Err(err);
        }

        self.modules.push(module);
        self.recompute();
        Ok(self.modules.len() - 1)
    }

    /// Install without space or tech checks. The design may become invalid;
    /// used by editors that let players overbuild before trimming.
    pub fn force_install(&mut self, module: Module) -> usize {
        self.modules.push(module);
        self.recompute();
        self.modules.len() - 1
    }

    /// Remove a non-core module
    pub fn remove_module(&mut self, index: usize) -> Result<Module, DesignError> {
        let module = self.modules.get(index).ok_or(DesignError::NoSuchSlot(index))?;
        if module.is_core() {
            return Err(DesignError::CoreModule {
                module: module.name.clone(),
                kind: module.variant().name(),
            });
        }

        let removed = self.modules.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Swap in new hull base stats. Existing modules stay, so a smaller hull
    /// can leave the design invalid until modules are removed.
    pub fn set_hull(&mut self, hull_class: HullClass, base: HullStats) {
        self.hull_class = hull_class;
        self.base = base;
        self.recompute();
    }

    /// Deep copy under a new name, bumping the version
    pub fn derive_variant(&self, name: impl Into<String>) -> ShipDesign {
        let mut copy = self.clone();
        copy.name = name.into();
        copy.version = self.version + 1;
        copy
    }

    /// Refuse to build an invalid design
    pub fn ensure_buildable(&self) -> Result<(), DesignError> {
        if self.valid {
            Ok(())
        } else {
            Err(DesignError::NotBuildable {
                name: self.name.clone(),
                reason: self.validation_message.clone(),
            })
        }
    }

    // === ACCESSORS ===

    pub fn base_stats(&self) -> &HullStats {
        &self.base
    }

    pub fn stats(&self) -> &DesignStats {
        &self.stats
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn modules_of(&self, variant: ModuleVariant) -> impl Iterator<Item = (usize, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.variant() == variant)
    }

    pub fn weapons(&self) -> impl Iterator<Item = (usize, &WeaponSpec)> {
        self.modules
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.weapon().map(|w| (i, w)))
    }

    pub fn defenses(&self) -> impl Iterator<Item = (usize, &DefenseSpec)> {
        self.modules
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.defense().map(|d| (i, d)))
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons().count()
    }

    pub fn hull_space_capacity(&self) -> u32 {
        self.base.hull_space
    }

    pub fn used_hull_space(&self) -> u32 {
        self.used_space
    }

    pub fn free_hull_space(&self) -> u32 {
        self.base.hull_space.saturating_sub(self.used_space)
    }

    pub fn power_output(&self) -> f32 {
        self.power_output
    }

    /// Power drawn by consumers (positive requirements only)
    pub fn power_draw(&self) -> f32 {
        self.power_draw
    }

    /// Output minus requirement across all modules
    pub fn available_power(&self) -> f32 {
        self.power_output - self.power_draw
    }

    pub fn has_power_deficit(&self) -> bool {
        self.available_power() < 0.0
    }

    /// Fuel burned per turn while moving, across all engines
    pub fn fuel_consumption(&self) -> f32 {
        self.modules
            .iter()
            .filter_map(|m| m.engine())
            .map(|e| e.fuel_consumption)
            .sum()
    }

    pub fn construction_cost(&self) -> &ResourceCost {
        &self.construction_cost
    }

    pub fn maintenance_cost(&self) -> &ResourceCost {
        &self.maintenance_cost
    }

    /// Aggregate special ability value, zero if nothing provides it
    pub fn special(&self, key: &str) -> f32 {
        self.specials.get(key).copied().unwrap_or(0.0)
    }

    pub fn specials(&self) -> &AHashMap<String, f32> {
        &self.specials
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn validation_message(&self) -> &str {
        &self.validation_message
    }

    /// One-line description for lists and logs
    pub fn summary(&self) -> String {
        format!(
            "{} v{} ({}): {:.0} HP, {:.0} armor, {:.0} shield, {} weapons, {}/{} space",
            self.name,
            self.version,
            self.hull_class.name(),
            self.stats.hit_points,
            self.stats.armor,
            self.stats.shield,
            self.weapon_count(),
            self.used_space,
            self.base.hull_space
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::module::{
        DefenseCategory, EngineSpec, PowerSpec, UtilityCategory, UtilitySpec, WeaponCategory,
    };
    use crate::services::{AllUnlocked, NothingUnlocked};

    fn weapon(name: &str, space: u32) -> Module {
        Module::new(
            name,
            space,
            ModuleKind::Weapon(WeaponSpec {
                category: WeaponCategory::Railgun,
                damage: 40.0,
                fire_rate: 1.0,
                range: 120.0,
                accuracy: 75.0,
                armor_penetration: 20.0,
                tracking_speed: 100.0,
                ammo: None,
            }),
        )
        .with_power(12.0)
        .with_construction_cost(ResourceCost::new(30.0, 10.0, 0.0, 0.0))
    }

    fn engine() -> Module {
        Module::new(
            "Ion Drive",
            50,
            ModuleKind::Engine(EngineSpec {
                thrust: 100.0,
                warp_speed: 1.0,
                maneuverability: 10.0,
                fuel_consumption: 5.0,
            }),
        )
        .with_power(20.0)
    }

    #[test]
    fn test_bare_hull_is_valid_and_empty() {
        let design = ShipDesign::new("Bare", HullClass::Cruiser);
        assert_eq!(design.used_hull_space(), 0);
        assert_eq!(design.hull_space_capacity(), 900);
        assert!(design.is_valid());
        assert_eq!(design.modules().len(), 1);
    }

    #[test]
    fn test_oversized_module_refused_with_overload() {
        let mut design = ShipDesign::new("Overgunned", HullClass::Cruiser);
        let result = design.add_module(weapon("Spinal Mount", 1000), &AllUnlocked);

        assert_eq!(
            result,
            Err(DesignError::InsufficientSpace {
                module: "Spinal Mount".into(),
                required: 1000,
                overload: 100,
            })
        );
        assert!(design.validation_message().contains("overloaded by 100 units"));
        assert_eq!(design.used_hull_space(), 0);
        assert!(design.is_valid());
    }

    #[test]
    fn test_tech_gate() {
        let mut design = ShipDesign::new("Gated", HullClass::Frigate);
        let gated = weapon("Plasma Lance", 30).with_tech(3, "plasma_physics");

        let err = design.add_module(gated.clone(), &NothingUnlocked).unwrap_err();
        assert!(matches!(err, DesignError::TechLocked { .. }));

        assert!(design.add_module(gated, &AllUnlocked).is_ok());
    }

    #[test]
    fn test_tech_level_one_ignores_unlocks() {
        let design = ShipDesign::new("Basic", HullClass::Frigate);
        let basic = weapon("Mass Driver", 30).with_tech(1, "ballistics");
        assert!(design.can_add_module(&basic, &NothingUnlocked).is_ok());
    }

    #[test]
    fn test_core_modules_cannot_be_removed() {
        let mut design = ShipDesign::new("Core", HullClass::Destroyer);
        let engine_slot = design.add_module(engine(), &AllUnlocked).unwrap();
        let gun_slot = design.add_module(weapon("Railgun", 40), &AllUnlocked).unwrap();

        assert!(matches!(
            design.remove_module(0),
            Err(DesignError::CoreModule { kind: "hull", .. })
        ));
        assert!(matches!(
            design.remove_module(engine_slot),
            Err(DesignError::CoreModule { kind: "engine", .. })
        ));
        assert!(design.remove_module(gun_slot).is_ok());
        assert!(matches!(design.remove_module(42), Err(DesignError::NoSuchSlot(42))));
    }

    #[test]
    fn test_second_hull_refused() {
        let mut design = ShipDesign::new("Hull", HullClass::Corvette);
        let extra = Module::new("Extra Frame", 0, ModuleKind::Hull(HullSpec::default()));
        assert!(matches!(
            design.add_module(extra, &AllUnlocked),
            Err(DesignError::HullAlreadyInstalled { .. })
        ));
    }

    #[test]
    fn test_stats_sum_module_bonuses() {
        let mut design = ShipDesign::new("Tank", HullClass::Destroyer);
        let base_armor = design.stats().armor;
        let plate = Module::new(
            "Plate",
            60,
            ModuleKind::Defense(DefenseSpec {
                category: DefenseCategory::Armor,
                defense_value: 75.0,
                recharge_rate: 2.0,
                coverage: 100.0,
            }),
        );
        design.add_module(plate, &AllUnlocked).unwrap();
        assert_eq!(design.stats().armor, base_armor + 75.0);
        assert_eq!(design.used_hull_space(), 60);
    }

    #[test]
    fn test_evasion_clamped() {
        let mut design = ShipDesign::new("Ghost", HullClass::Corvette);
        let ecm = Module::new(
            "ECM",
            10,
            ModuleKind::Defense(DefenseSpec {
                category: DefenseCategory::Ecm,
                defense_value: 200.0,
                recharge_rate: 0.0,
                coverage: 100.0,
            }),
        );
        design.add_module(ecm, &AllUnlocked).unwrap();
        assert_eq!(design.stats().evasion, MAX_EVASION);
    }

    #[test]
    fn test_capacity_floors() {
        let mut base = HullClass::Corvette.base_stats();
        base.crew_capacity = 0;
        base.fuel_capacity = 0.0;
        let mut design = ShipDesign::with_base_stats("Tiny", HullClass::Corvette, base);
        let cramped = Module::new(
            "Cramped Quarters",
            5,
            ModuleKind::Utility(UtilitySpec {
                category: UtilityCategory::CargoBay,
                value: -500.0,
            }),
        );
        design.add_module(cramped, &AllUnlocked).unwrap();
        assert_eq!(design.stats().crew_capacity, MIN_CREW_CAPACITY);
        assert_eq!(design.stats().fuel_capacity, MIN_FUEL_CAPACITY);
        assert_eq!(design.stats().cargo_capacity, 0);
    }

    #[test]
    fn test_power_balance() {
        let mut design = ShipDesign::new("Power", HullClass::Frigate);
        let output = design.power_output();
        design.add_module(engine(), &AllUnlocked).unwrap();
        assert_eq!(design.available_power(), output - 20.0);

        let reactor = Module::new(
            "Reactor",
            40,
            ModuleKind::Power(PowerSpec {
                output: 100.0,
                fuel_capacity: 50.0,
            }),
        );
        design.add_module(reactor, &AllUnlocked).unwrap();
        assert_eq!(design.available_power(), output + 100.0 - 20.0);
        assert_eq!(design.power_draw(), 20.0);
    }

    #[test]
    fn test_power_deficit_is_a_warning_not_invalid() {
        let mut base = HullClass::Frigate.base_stats();
        base.power_output = 0.0;
        let mut design = ShipDesign::with_base_stats("Dark", HullClass::Frigate, base);
        design.add_module(weapon("Railgun", 40), &AllUnlocked).unwrap();
        assert!(design.has_power_deficit());
        assert!(design.is_valid());
        assert!(design.validation_message().contains("power deficit"));
    }

    #[test]
    fn test_costs_include_hull_surcharge() {
        let mut design = ShipDesign::new("Priced", HullClass::Cruiser);
        let bare_metal = design.construction_cost().metal;
        assert_eq!(bare_metal, 900.0 * HULL_METAL_PER_SPACE);

        design.add_module(weapon("Railgun", 40), &AllUnlocked).unwrap();
        assert_eq!(design.construction_cost().metal, bare_metal + 30.0);
        assert_eq!(
            design.maintenance_cost().energy,
            900.0 * HULL_UPKEEP_ENERGY_PER_SPACE
        );
    }

    #[test]
    fn test_shrinking_hull_invalidates() {
        let mut design = ShipDesign::new("Refit", HullClass::Destroyer);
        design.add_module(weapon("Railgun", 300), &AllUnlocked).unwrap();
        design.set_hull(HullClass::Corvette, HullClass::Corvette.base_stats());
        assert!(!design.is_valid());
        assert!(design.validation_message().contains("overloaded by 100 units"));
        assert!(design.ensure_buildable().is_err());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut design = ShipDesign::new("Stable", HullClass::Cruiser);
        design.add_module(engine(), &AllUnlocked).unwrap();
        design.add_module(weapon("Railgun", 40), &AllUnlocked).unwrap();
        let before = design.clone();
        design.recompute();
        design.recompute();
        assert_eq!(design, before);
    }

    #[test]
    fn test_derived_variant_is_deep_copy() {
        let mut design = ShipDesign::new("Mk I", HullClass::Frigate);
        design.add_module(weapon("Railgun", 40), &AllUnlocked).unwrap();
        let mut variant = design.derive_variant("Mk II");
        variant.remove_module(1).unwrap();

        assert_eq!(variant.version, 2);
        assert_eq!(design.weapon_count(), 1);
        assert_eq!(variant.weapon_count(), 0);
    }

    #[test]
    fn test_fuel_consumption_sums_engines() {
        let mut design = ShipDesign::new("Twin", HullClass::Destroyer);
        design.add_module(engine(), &AllUnlocked).unwrap();
        design.add_module(engine(), &AllUnlocked).unwrap();
        assert_eq!(design.fuel_consumption(), 10.0);
    }
}
