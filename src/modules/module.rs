//! Ship modules: the composable parts a design is built from
//!
//! A module is immutable configuration. Common properties (space, power,
//! tech gate, costs) live on `Module`; per-variant data lives in `ModuleKind`.
//! Every variant answers the same stat contract through `stat_bonus()` and
//! `special_abilities()`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::design::cost::ResourceCost;
use crate::modules::stats::StatBlock;
use crate::ship::damage::DamageType;

/// Special ability keys produced by the built-in variants
pub mod specials {
    pub const DETECTION_RANGE: &str = "detection_range";
    pub const INTERCEPTION_RATE: &str = "interception_rate";
    pub const REPAIR_RATE: &str = "repair_rate";
    pub const ECM_STRENGTH: &str = "ecm_strength";
    pub const CLOAK_STRENGTH: &str = "cloak_strength";
}

/// The six module variants, without their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleVariant {
    Hull,
    Engine,
    Power,
    Weapon,
    Defense,
    Utility,
}

impl ModuleVariant {
    pub fn all() -> &'static [ModuleVariant] {
        &[
            ModuleVariant::Hull,
            ModuleVariant::Engine,
            ModuleVariant::Power,
            ModuleVariant::Weapon,
            ModuleVariant::Defense,
            ModuleVariant::Utility,
        ]
    }

    /// Core modules exist for the lifetime of a design and cannot be removed
    pub fn is_core(&self) -> bool {
        matches!(
            self,
            ModuleVariant::Hull | ModuleVariant::Engine | ModuleVariant::Power
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModuleVariant::Hull => "hull",
            ModuleVariant::Engine => "engine",
            ModuleVariant::Power => "power",
            ModuleVariant::Weapon => "weapon",
            ModuleVariant::Defense => "defense",
            ModuleVariant::Utility => "utility",
        }
    }
}

/// Structural frame. Adds reinforcement on top of the hull class base stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullSpec {
    pub reinforcement: f32,
    pub plating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSpec {
    pub thrust: f32,
    pub warp_speed: f32,
    pub maneuverability: f32,
    /// Fuel burned per turn while the ship is moving
    pub fuel_consumption: f32,
}

impl Default for EngineSpec {
    fn default() -> Self {
        Self {
            thrust: 0.0,
            warp_speed: 0.0,
            maneuverability: 0.0,
            fuel_consumption: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSpec {
    pub output: f32,
    /// Onboard fuel cells
    pub fuel_capacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    Laser,
    Plasma,
    Ion,
    Railgun,
    MassDriver,
    Missile,
    Torpedo,
}

impl WeaponCategory {
    pub fn damage_type(&self) -> DamageType {
        match self {
            WeaponCategory::Laser | WeaponCategory::Plasma | WeaponCategory::Ion => {
                DamageType::Energy
            }
            WeaponCategory::Railgun | WeaponCategory::MassDriver => DamageType::Kinetic,
            WeaponCategory::Missile | WeaponCategory::Torpedo => DamageType::Explosive,
        }
    }
}

/// Munition kinds stocked per ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoKind {
    Slug,
    Missile,
    Torpedo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoSpec {
    pub kind: AmmoKind,
    /// Rounds used per firing attempt
    pub per_shot: u32,
    /// Magazine size contributed by this weapon
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub category: WeaponCategory,
    pub damage: f32,
    /// Shots per turn, used for sustained damage output
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f32,
    pub range: f32,
    /// 0-100
    pub accuracy: f32,
    /// 0-100, share of the target's armor ignored
    #[serde(default)]
    pub armor_penetration: f32,
    /// 0-100, ability to follow evasive targets
    #[serde(default = "default_tracking")]
    pub tracking_speed: f32,
    #[serde(default)]
    pub ammo: Option<AmmoSpec>,
}

fn default_fire_rate() -> f32 {
    1.0
}

fn default_tracking() -> f32 {
    100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseCategory {
    Shield,
    Armor,
    PointDefense,
    Ecm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseSpec {
    pub category: DefenseCategory,
    pub defense_value: f32,
    /// Points restored per turn out of combat
    #[serde(default)]
    pub recharge_rate: f32,
    /// 0-100
    #[serde(default = "default_coverage")]
    pub coverage: f32,
}

fn default_coverage() -> f32 {
    100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilityCategory {
    Sensor,
    CrewQuarters,
    CargoBay,
    FuelTank,
    RepairBay,
    Cloak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilitySpec {
    pub category: UtilityCategory,
    pub value: f32,
}

/// Per-variant module data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ModuleKind {
    Hull(HullSpec),
    Engine(EngineSpec),
    Power(PowerSpec),
    Weapon(WeaponSpec),
    Defense(DefenseSpec),
    Utility(UtilitySpec),
}

impl ModuleKind {
    pub fn variant(&self) -> ModuleVariant {
        match self {
            ModuleKind::Hull(_) => ModuleVariant::Hull,
            ModuleKind::Engine(_) => ModuleVariant::Engine,
            ModuleKind::Power(_) => ModuleVariant::Power,
            ModuleKind::Weapon(_) => ModuleVariant::Weapon,
            ModuleKind::Defense(_) => ModuleVariant::Defense,
            ModuleKind::Utility(_) => ModuleVariant::Utility,
        }
    }
}

/// One installable module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    /// Hull space consumed
    #[serde(default)]
    pub space: u32,
    /// Power drawn. Ignored for power modules, whose requirement is `-output`.
    #[serde(default)]
    pub power: f32,
    #[serde(default = "default_tech_level")]
    pub tech_level: u8,
    #[serde(default)]
    pub required_tech: Option<String>,
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub construction_cost: ResourceCost,
    #[serde(default)]
    pub maintenance_cost: ResourceCost,
    /// Extra named abilities on top of what the variant provides
    #[serde(default)]
    pub specials: AHashMap<String, f32>,
    pub kind: ModuleKind,
}

fn default_tech_level() -> u8 {
    1
}

impl Module {
    pub fn new(name: impl Into<String>, space: u32, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            space,
            power: 0.0,
            tech_level: 1,
            required_tech: None,
            weight: 0.0,
            construction_cost: ResourceCost::default(),
            maintenance_cost: ResourceCost::default(),
            specials: AHashMap::new(),
            kind,
        }
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn with_tech(mut self, level: u8, tech: impl Into<String>) -> Self {
        self.tech_level = level;
        self.required_tech = Some(tech.into());
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_construction_cost(mut self, cost: ResourceCost) -> Self {
        self.construction_cost = cost;
        self
    }

    pub fn with_maintenance_cost(mut self, cost: ResourceCost) -> Self {
        self.maintenance_cost = cost;
        self
    }

    pub fn with_special(mut self, key: impl Into<String>, value: f32) -> Self {
        self.specials.insert(key.into(), value);
        self
    }

    pub fn variant(&self) -> ModuleVariant {
        self.kind.variant()
    }

    pub fn is_core(&self) -> bool {
        self.variant().is_core()
    }

    /// Power drawn from the grid. Negative for producers.
    pub fn power_requirement(&self) -> f32 {
        match &self.kind {
            ModuleKind::Power(spec) => -spec.output,
            _ => self.power,
        }
    }

    pub fn weapon(&self) -> Option<&WeaponSpec> {
        match &self.kind {
            ModuleKind::Weapon(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn defense(&self) -> Option<&DefenseSpec> {
        match &self.kind {
            ModuleKind::Defense(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn engine(&self) -> Option<&EngineSpec> {
        match &self.kind {
            ModuleKind::Engine(spec) => Some(spec),
            _ => None,
        }
    }

    /// Additive contribution to the design's statistics
    pub fn stat_bonus(&self) -> StatBlock {
        match &self.kind {
            ModuleKind::Hull(spec) => StatBlock {
                hit_points: spec.reinforcement,
                armor: spec.plating,
                ..Default::default()
            },
            ModuleKind::Engine(spec) => StatBlock {
                engine_power: spec.thrust,
                warp_speed: spec.warp_speed,
                maneuverability: spec.maneuverability,
                ..Default::default()
            },
            ModuleKind::Power(spec) => StatBlock {
                fuel_capacity: spec.fuel_capacity,
                ..Default::default()
            },
            ModuleKind::Weapon(_) => StatBlock::zero(),
            ModuleKind::Defense(spec) => match spec.category {
                DefenseCategory::Shield => StatBlock {
                    shield: spec.defense_value,
                    ..Default::default()
                },
                DefenseCategory::Armor => StatBlock {
                    armor: spec.defense_value,
                    ..Default::default()
                },
                DefenseCategory::Ecm => StatBlock {
                    evasion: spec.defense_value,
                    ..Default::default()
                },
                DefenseCategory::PointDefense => StatBlock::zero(),
            },
            ModuleKind::Utility(spec) => match spec.category {
                UtilityCategory::CrewQuarters => StatBlock {
                    crew_capacity: spec.value as i32,
                    ..Default::default()
                },
                UtilityCategory::CargoBay => StatBlock {
                    cargo_capacity: spec.value as i32,
                    ..Default::default()
                },
                UtilityCategory::FuelTank => StatBlock {
                    fuel_capacity: spec.value,
                    ..Default::default()
                },
                UtilityCategory::Cloak => StatBlock {
                    evasion: spec.value * 0.1,
                    ..Default::default()
                },
                UtilityCategory::Sensor | UtilityCategory::RepairBay => StatBlock::zero(),
            },
        }
    }

    /// Named abilities: the variant's own plus any configured extras
    pub fn special_abilities(&self) -> AHashMap<String, f32> {
        let mut out = self.specials.clone();
        let mut put = |key: &str, value: f32| {
            *out.entry(key.to_string()).or_insert(0.0) += value;
        };

        match &self.kind {
            ModuleKind::Defense(spec) => match spec.category {
                DefenseCategory::PointDefense => {
                    put(specials::INTERCEPTION_RATE, spec.defense_value * spec.coverage / 100.0)
                }
                DefenseCategory::Ecm => put(specials::ECM_STRENGTH, spec.defense_value),
                _ => {}
            },
            ModuleKind::Utility(spec) => match spec.category {
                UtilityCategory::Sensor => put(specials::DETECTION_RANGE, spec.value),
                UtilityCategory::RepairBay => put(specials::REPAIR_RATE, spec.value),
                UtilityCategory::Cloak => put(specials::CLOAK_STRENGTH, spec.value),
                _ => {}
            },
            _ => {}
        }

        out
    }
}
