//! Module catalog: the templates designs are assembled from
//!
//! The catalog owns one template per module name. Installing a module clones
//! the template, so every design owns its own copies. Templates come from the
//! built-in standard set or from TOML files.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{FleetError, Result};
use crate::design::cost::ResourceCost;
use crate::design::hull::HullClass;
use crate::design::ship_design::ShipDesign;
use crate::modules::module::{
    AmmoKind, AmmoSpec, DefenseCategory, DefenseSpec, EngineSpec, Module, ModuleKind,
    ModuleVariant, PowerSpec, UtilityCategory, UtilitySpec, WeaponCategory, WeaponSpec,
};
use crate::services::TechUnlocks;

/// On-disk layout of a catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Registry of module templates
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    /// Templates in registration order
    templates: Vec<Module>,
    /// Map from name to template index
    by_name: HashMap<String, usize>,
    /// Map from variant to template indices
    by_variant: HashMap<ModuleVariant, Vec<usize>>,
}

impl ModuleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. A template with the same name is replaced.
    pub fn register(&mut self, module: Module) {
        if let Some(&idx) = self.by_name.get(&module.name) {
            let old_variant = self.templates[idx].variant();
            if let Some(list) = self.by_variant.get_mut(&old_variant) {
                list.retain(|&i| i != idx);
            }
            self.by_variant.entry(module.variant()).or_default().push(idx);
            self.templates[idx] = module;
            return;
        }

        let idx = self.templates.len();
        self.by_name.insert(module.name.clone(), idx);
        self.by_variant.entry(module.variant()).or_default().push(idx);
        self.templates.push(module);
    }

    /// Parse templates from a TOML string and register them
    pub fn load_str(&mut self, content: &str) -> Result<usize> {
        let file: CatalogFile = toml::from_str(content)?;
        let count = file.modules.len();
        for module in file.modules {
            self.register(module);
        }
        Ok(count)
    }

    /// Load a TOML catalog file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let count = self.load_str(&content)?;
        tracing::debug!("Loaded {} module templates from {}", count, path.display());
        Ok(count)
    }

    /// Load all .toml files from a directory recursively
    pub fn load_directory(&mut self, path: &Path) -> Result<usize> {
        let mut count = 0;
        for entry in std::fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_dir() {
                count += self.load_directory(&entry_path)?;
            } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
                count += self.load_file(&entry_path)?;
            }
        }
        Ok(count)
    }

    /// Serialize the catalog back to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        let file = CatalogFile {
            modules: self.templates.clone(),
        };
        toml::to_string(&file)
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|&idx| &self.templates[idx])
    }

    /// Fresh copy of a template, ready to install
    pub fn instantiate(&self, name: &str) -> Result<Module> {
        self.get(name)
            .cloned()
            .ok_or_else(|| FleetError::UnknownModule(name.to_string()))
    }

    pub fn of_variant(&self, variant: ModuleVariant) -> impl Iterator<Item = &Module> {
        self.by_variant
            .get(&variant)
            .into_iter()
            .flat_map(|ids| ids.iter().map(|&idx| &self.templates[idx]))
    }

    /// Templates the given unlock set allows
    pub fn available<'a>(&'a self, unlocks: &'a dyn TechUnlocks) -> impl Iterator<Item = &'a Module> {
        self.templates.iter().filter(move |m| {
            m.tech_level <= 1
                || m.required_tech
                    .as_deref()
                    .map_or(true, |tech| unlocks.is_unlocked(tech))
        })
    }

    /// Every template, in registration order
    pub fn templates(&self) -> &[Module] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Assemble a design from named templates, stopping at the first refusal
    pub fn build_design(
        &self,
        name: &str,
        hull_class: HullClass,
        module_names: &[&str],
        unlocks: &dyn TechUnlocks,
    ) -> Result<ShipDesign> {
        let mut design = ShipDesign::new(name, hull_class);
        for module_name in module_names {
            let module = self.instantiate(module_name)?;
            design.add_module(module, unlocks)?;
        }
        Ok(design)
    }

    /// The built-in module set
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for module in standard_modules() {
            catalog.register(module);
        }
        catalog
    }
}

fn cost(space: u32, power: f32, tech_level: u8) -> ResourceCost {
    let crystal = if tech_level > 1 {
        space as f32 * 0.2 * tech_level as f32
    } else {
        0.0
    };
    ResourceCost::new(space as f32, power.abs() * 0.5, crystal, space as f32 * 2.0)
}

fn upkeep(space: u32, power: f32) -> ResourceCost {
    ResourceCost::new(0.0, power.max(0.0) * 0.05, 0.0, space as f32 * 0.02)
}

fn priced(module: Module) -> Module {
    let power = module.power_requirement();
    let build = cost(module.space, power, module.tech_level);
    let keep = upkeep(module.space, power);
    module.with_construction_cost(build).with_maintenance_cost(keep)
}

fn engine(name: &str, space: u32, power: f32, thrust: f32, warp: f32, man: f32, fuel: f32) -> Module {
    Module::new(
        name,
        space,
        ModuleKind::Engine(EngineSpec {
            thrust,
            warp_speed: warp,
            maneuverability: man,
            fuel_consumption: fuel,
        }),
    )
    .with_power(power)
}

fn reactor(name: &str, space: u32, output: f32, fuel_capacity: f32) -> Module {
    Module::new(
        name,
        space,
        ModuleKind::Power(PowerSpec {
            output,
            fuel_capacity,
        }),
    )
}

#[allow(clippy::too_many_arguments)]
fn weapon(
    name: &str,
    space: u32,
    power: f32,
    category: WeaponCategory,
    damage: f32,
    fire_rate: f32,
    range: f32,
    accuracy: f32,
    penetration: f32,
    tracking: f32,
    ammo: Option<AmmoSpec>,
) -> Module {
    Module::new(
        name,
        space,
        ModuleKind::Weapon(WeaponSpec {
            category,
            damage,
            fire_rate,
            range,
            accuracy,
            armor_penetration: penetration,
            tracking_speed: tracking,
            ammo,
        }),
    )
    .with_power(power)
}

fn defense(
    name: &str,
    space: u32,
    power: f32,
    category: DefenseCategory,
    value: f32,
    recharge: f32,
    coverage: f32,
) -> Module {
    Module::new(
        name,
        space,
        ModuleKind::Defense(DefenseSpec {
            category,
            defense_value: value,
            recharge_rate: recharge,
            coverage,
        }),
    )
    .with_power(power)
}

fn utility(name: &str, space: u32, power: f32, category: UtilityCategory, value: f32) -> Module {
    Module::new(name, space, ModuleKind::Utility(UtilitySpec { category, value })).with_power(power)
}

fn ammo(kind: AmmoKind, capacity: u32) -> Option<AmmoSpec> {
    Some(AmmoSpec {
        kind,
        per_shot: 1,
        capacity,
    })
}

fn standard_modules() -> Vec<Module> {
    use DefenseCategory as D;
    use UtilityCategory as U;
    use WeaponCategory as W;

    vec![
        // Engines
        engine("Chemical Thruster", 40, 5.0, 60.0, 0.5, 10.0, 4.0).with_weight(20.0),
        engine("Ion Drive", 60, 15.0, 100.0, 1.0, 15.0, 3.0)
            .with_tech(2, "ion_propulsion")
            .with_weight(25.0),
        engine("Warp Core Drive", 100, 40.0, 160.0, 2.0, 10.0, 6.0)
            .with_tech(3, "warp_theory")
            .with_weight(45.0),
        // Power
        reactor("Fission Reactor", 50, 100.0, 50.0).with_weight(40.0),
        reactor("Fusion Reactor", 70, 250.0, 100.0)
            .with_tech(2, "fusion_power")
            .with_weight(50.0),
        reactor("Antimatter Core", 90, 600.0, 0.0)
            .with_tech(4, "antimatter")
            .with_weight(30.0),
        // Weapons
        weapon("Pulse Laser", 30, 10.0, W::Laser, 25.0, 2.0, 150.0, 85.0, 10.0, 90.0, None),
        weapon("Plasma Cannon", 60, 30.0, W::Plasma, 80.0, 1.0, 120.0, 70.0, 30.0, 60.0, None)
            .with_tech(2, "plasma_physics"),
        weapon("Ion Disruptor", 40, 18.0, W::Ion, 30.0, 1.5, 140.0, 80.0, 60.0, 80.0, None)
            .with_tech(2, "ion_weapons"),
        weapon("Railgun", 50, 20.0, W::Railgun, 60.0, 1.0, 250.0, 80.0, 40.0, 70.0, ammo(AmmoKind::Slug, 40)),
        weapon("Mass Driver", 40, 8.0, W::MassDriver, 35.0, 1.5, 180.0, 75.0, 15.0, 80.0, ammo(AmmoKind::Slug, 60)),
        weapon("Missile Launcher", 40, 5.0, W::Missile, 70.0, 1.0, 400.0, 90.0, 20.0, 100.0, ammo(AmmoKind::Missile, 20)),
        weapon("Torpedo Tube", 80, 10.0, W::Torpedo, 200.0, 0.5, 300.0, 60.0, 50.0, 40.0, ammo(AmmoKind::Torpedo, 8))
            .with_tech(3, "heavy_ordnance"),
        // Defense
        defense("Deflector Shield", 40, 20.0, D::Shield, 200.0, 20.0, 100.0),
        defense("Phase Shield", 60, 40.0, D::Shield, 500.0, 50.0, 100.0).with_tech(3, "phase_shielding"),
        defense("Composite Armor", 50, 0.0, D::Armor, 100.0, 5.0, 100.0).with_weight(60.0),
        defense("Ablative Plating", 70, 0.0, D::Armor, 220.0, 2.0, 100.0)
            .with_tech(2, "advanced_metallurgy")
            .with_weight(90.0),
        defense("Flak Battery", 30, 8.0, D::PointDefense, 40.0, 0.0, 75.0),
        defense("ECM Suite", 20, 12.0, D::Ecm, 15.0, 0.0, 100.0),
        // Utility
        utility("Sensor Array", 20, 5.0, U::Sensor, 300.0),
        utility("Long Range Scanner", 40, 15.0, U::Sensor, 800.0).with_tech(2, "subspace_sensors"),
        utility("Crew Quarters", 30, 2.0, U::CrewQuarters, 40.0),
        utility("Cargo Bay", 50, 0.0, U::CargoBay, 200.0),
        utility("Fuel Tank", 30, 0.0, U::FuelTank, 300.0),
        utility("Repair Bay", 60, 10.0, U::RepairBay, 5.0),
        utility("Cloaking Device", 50, 50.0, U::Cloak, 100.0).with_tech(4, "cloaking"),
    ]
    .into_iter()
    .map(priced)
    .collect()
}
