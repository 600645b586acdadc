//! Ship combat and upkeep constants - all tunable defaults in one place
//!
//! `CombatConfig::default()` is built from these. Override through the config
//! rather than editing call sites.

// Damage resolution
/// Floor on damage that gets through armor, as a fraction of the incoming hit
pub const MIN_DAMAGE_FRACTION: f32 = 0.1;
/// Armor damage above this fraction of remaining armor shakes internal modules
pub const ARMOR_MODULE_DAMAGE_THRESHOLD: f32 = 0.1;
pub const ARMOR_MODULE_DAMAGE_FACTOR: f32 = 0.01;
pub const HULL_MODULE_DAMAGE_FACTOR: f32 = 0.02;
/// Integrity lost when a hit equal to full hull points lands
pub const INTEGRITY_LOSS_FACTOR: f32 = 50.0;
pub const CREW_CASUALTY_FACTOR: f32 = 0.1;
pub const MODULE_HITS_MIN: usize = 1;
pub const MODULE_HITS_MAX: usize = 3;
pub const MODULE_DAMAGE_VARIANCE_MIN: f32 = 0.5;
pub const MODULE_DAMAGE_VARIANCE_MAX: f32 = 1.5;

// Weapon fire
pub const MIN_HIT_CHANCE: f32 = 0.1;
pub const MAX_HIT_CHANCE: f32 = 0.95;
pub const RANGE_FALLOFF: f32 = 0.5;

// Module status thresholds (integrity, 0-100)
pub const MODULE_SUPPRESSION_THRESHOLD: f32 = 30.0;
pub const MODULE_RESTORE_THRESHOLD: f32 = 50.0;

// Turn processing (per turn)
pub const INTEGRITY_RECOVERY_RATE: f32 = 1.0;
pub const MODULE_REPAIR_RATE: f32 = 2.0;
pub const FOOD_PER_CREW: f32 = 0.1;
pub const ENERGY_PER_POWER: f32 = 0.05;
pub const FOOD_SHORTAGE_MORALE_PENALTY: f32 = 10.0;
pub const ENERGY_SHORTAGE_READINESS_PENALTY: f32 = 10.0;
pub const MORALE_BLEND: f32 = 0.25;
pub const COMBAT_MORALE_STRESS: f32 = 15.0;

// Design limits
pub const MAX_EVASION: f32 = 95.0;
pub const MIN_CREW_CAPACITY: u32 = 10;
pub const MIN_CARGO_CAPACITY: u32 = 0;
pub const MIN_FUEL_CAPACITY: f32 = 100.0;
