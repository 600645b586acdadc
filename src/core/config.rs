//! Combat configuration with documented constants
//!
//! Every tuning value used by damage resolution, weapon fire, turn upkeep and
//! the battle resolvers lives here so it can be overridden from TOML without
//! touching call sites.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::installation::INSTALLATION_COUNTER_RATIO;
use crate::battle::skirmish::MAX_SKIRMISH_ROUNDS;
use crate::core::error::{FleetError, Result};
use crate::fleet::supply::{
    FLEET_ENERGY_PER_POWER, FLEET_ENERGY_SHORTAGE_READINESS_PENALTY, FLEET_FOOD_PER_CREW,
    FLEET_FOOD_SHORTAGE_MORALE_PENALTY,
};
use crate::ship::constants::*;

/// Configuration for the combat and upkeep systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === DAMAGE RESOLUTION ===
    /// Armor damage larger than this fraction of the armor left afterwards
    /// triggers random module damage.
    pub armor_module_damage_threshold: f32,

    /// Module damage magnitude per point of armor damage
    pub armor_module_damage_factor: f32,

    /// Module damage magnitude per point of hull damage
    pub hull_module_damage_factor: f32,

    /// Integrity lost when a hit equal to the full hull pool lands
    ///
    /// A hit for 10% of max hull costs 5 integrity at the default of 50.
    pub integrity_loss_factor: f32,

    /// Fraction of crew lost per 100 points of hull damage
    pub crew_casualty_factor: f32,

    /// How many modules a damage roll can hit (inclusive range)
    pub module_hits_min: usize,
    pub module_hits_max: usize,

    /// Per-module damage multiplier is rolled uniformly in this range
    pub module_damage_variance_min: f32,
    pub module_damage_variance_max: f32,

    // === WEAPON FIRE ===
    pub min_hit_chance: f32,
    pub max_hit_chance: f32,

    /// Hit chance lost at the edge of effective range (0.5 = half)
    pub range_falloff: f32,

    // === SHIP UPKEEP ===
    /// Integrity regained per turn at full crew and full morale
    pub integrity_recovery_rate: f32,

    /// Integrity regained by each module per turn out of combat
    pub module_repair_rate: f32,

    pub food_per_crew: f32,
    pub energy_per_power: f32,
    pub food_shortage_morale_penalty: f32,
    pub energy_shortage_readiness_penalty: f32,

    /// How far morale moves toward its target each turn (0..=1)
    pub morale_blend: f32,

    /// Target morale reduction while the ship is under fire
    pub combat_morale_stress: f32,

    // === FLEET UPKEEP ===
    pub fleet_food_per_crew: f32,
    pub fleet_energy_per_power: f32,
    pub fleet_food_shortage_morale_penalty: f32,
    pub fleet_energy_shortage_readiness_penalty: f32,

    // === BATTLE ===
    /// Round cap for free-for-all skirmishes; guarantees termination
    pub max_skirmish_rounds: u32,

    /// Installation counter-attack power as a fraction of its defense strength
    pub installation_counter_ratio: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            armor_module_damage_threshold: ARMOR_MODULE_DAMAGE_THRESHOLD,
            armor_module_damage_factor: ARMOR_MODULE_DAMAGE_FACTOR,
            hull_module_damage_factor: HULL_MODULE_DAMAGE_FACTOR,
            integrity_loss_factor: INTEGRITY_LOSS_FACTOR,
            crew_casualty_factor: CREW_CASUALTY_FACTOR,
            module_hits_min: MODULE_HITS_MIN,
            module_hits_max: MODULE_HITS_MAX,
            module_damage_variance_min: MODULE_DAMAGE_VARIANCE_MIN,
            module_damage_variance_max: MODULE_DAMAGE_VARIANCE_MAX,

            min_hit_chance: MIN_HIT_CHANCE,
            max_hit_chance: MAX_HIT_CHANCE,
            range_falloff: RANGE_FALLOFF,

            integrity_recovery_rate: INTEGRITY_RECOVERY_RATE,
            module_repair_rate: MODULE_REPAIR_RATE,
            food_per_crew: FOOD_PER_CREW,
            energy_per_power: ENERGY_PER_POWER,
            food_shortage_morale_penalty: FOOD_SHORTAGE_MORALE_PENALTY,
            energy_shortage_readiness_penalty: ENERGY_SHORTAGE_READINESS_PENALTY,
            morale_blend: MORALE_BLEND,
            combat_morale_stress: COMBAT_MORALE_STRESS,

            fleet_food_per_crew: FLEET_FOOD_PER_CREW,
            fleet_energy_per_power: FLEET_ENERGY_PER_POWER,
            fleet_food_shortage_morale_penalty: FLEET_FOOD_SHORTAGE_MORALE_PENALTY,
            fleet_energy_shortage_readiness_penalty: FLEET_ENERGY_SHORTAGE_READINESS_PENALTY,

            max_skirmish_rounds: MAX_SKIRMISH_ROUNDS,
            installation_counter_ratio: INSTALLATION_COUNTER_RATIO,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate().map_err(FleetError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.module_hits_min == 0 || self.module_hits_min > self.module_hits_max {
            return Err(format!(
                "module_hits_min ({}) must be >= 1 and <= module_hits_max ({})",
                self.module_hits_min, self.module_hits_max
            ));
        }

        if self.module_damage_variance_min > self.module_damage_variance_max {
            return Err(format!(
                "module_damage_variance_min ({}) must be <= module_damage_variance_max ({})",
                self.module_damage_variance_min, self.module_damage_variance_max
            ));
        }

        if !(0.0..=1.0).contains(&self.min_hit_chance)
            || !(0.0..=1.0).contains(&self.max_hit_chance)
            || self.min_hit_chance > self.max_hit_chance
        {
            return Err(format!(
                "hit chance bounds ({}, {}) must be ordered within [0, 1]",
                self.min_hit_chance, self.max_hit_chance
            ));
        }

        if !(0.0..=1.0).contains(&self.morale_blend) {
            return Err(format!("morale_blend ({}) must be within [0, 1]", self.morale_blend));
        }

        if self.max_skirmish_rounds == 0 {
            return Err("max_skirmish_rounds must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<CombatConfig> = OnceLock::new();

/// Get the global combat config (initializes with defaults if not set)
pub fn config() -> &'static CombatConfig {
    CONFIG.get_or_init(CombatConfig::default)
}

/// Set the global combat config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: CombatConfig) -> std::result::Result<(), CombatConfig> {
    CONFIG.set(config)
}
