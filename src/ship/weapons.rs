//! Weapon fire: hit chance, range and per-shot damage

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::modules::module::WeaponSpec;
use crate::ship::damage::Damage;

/// Range after module wear. Never below 1 so the falloff stays defined.
pub fn effective_range(spec: &WeaponSpec, effectiveness: f32) -> f32 {
    (spec.range * effectiveness).max(1.0)
}

/// Probability that one shot lands, or `None` when the target is out of range
pub fn hit_chance(
    spec: &WeaponSpec,
    effectiveness: f32,
    distance: f32,
    target_evasion: f32,
    config: &CombatConfig,
) -> Option<f32> {
    let range = effective_range(spec, effectiveness);
    if distance > range {
        return None;
    }

    let range_factor = 1.0 - (distance.max(0.0) / range) * config.range_falloff;
    let evasion_factor = 1.0 - target_evasion.clamp(0.0, 100.0) / 100.0;
    let chance = spec.accuracy / 100.0 * range_factor * evasion_factor * spec.tracking_speed / 100.0;

    Some(chance.clamp(config.min_hit_chance, config.max_hit_chance))
}

/// The damage packet a landed shot delivers
pub fn shot_damage(spec: &WeaponSpec, effectiveness: f32, readiness: f32) -> Damage {
    let amount = spec.damage * spec.accuracy / 100.0 * effectiveness * readiness / 100.0;
    Damage::new(amount, spec.category.damage_type(), spec.armor_penetration)
}

/// Sustained output of one weapon, used for combat power estimates
pub fn sustained_output(spec: &WeaponSpec, effectiveness: f32, readiness: f32) -> f32 {
    spec.damage * spec.fire_rate * spec.accuracy / 100.0 * effectiveness * readiness / 100.0
}

/// Summary of one ship firing every weapon once at one target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolleyReport {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    /// Shots that could not reach the target (counted as misses too)
    pub out_of_range: u32,
    /// Weapons that stayed silent for lack of ammunition
    pub dry: u32,
    /// Raw damage of landed shots, before defenses
    pub damage_sent: f32,
    pub shield_absorbed: f32,
    pub armor_absorbed: f32,
    pub hull_damage: f32,
    pub crew_killed: u32,
    pub target_destroyed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::module::WeaponCategory;
    use crate::ship::damage::DamageType;

    fn gun() -> WeaponSpec {
        WeaponSpec {
            category: WeaponCategory::Railgun,
            damage: 50.0,
            fire_rate: 2.0,
            range: 200.0,
            accuracy: 80.0,
            armor_penetration: 25.0,
            tracking_speed: 100.0,
            ammo: None,
        }
    }

    #[test]
    fn test_point_blank_hit_chance() {
        let config = CombatConfig::default();
        let chance = hit_chance(&gun(), 1.0, 0.0, 0.0, &config).unwrap();
        assert!((chance - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_range_falloff_and_out_of_range() {
        let config = CombatConfig::default();
        let edge = hit_chance(&gun(), 1.0, 200.0, 0.0, &config).unwrap();
        assert!((edge - 0.4).abs() < 1e-6);
        assert!(hit_chance(&gun(), 1.0, 201.0, 0.0, &config).is_none());
    }

    #[test]
    fn test_worn_weapon_loses_range() {
        let config = CombatConfig::default();
        assert_eq!(effective_range(&gun(), 0.5), 100.0);
        assert!(hit_chance(&gun(), 0.5, 150.0, 0.0, &config).is_none());
        assert_eq!(effective_range(&gun(), 0.0), 1.0);
    }

    #[test]
    fn test_hit_chance_clamped() {
        let config = CombatConfig::default();
        let mut sharp = gun();
        sharp.accuracy = 100.0;
        assert_eq!(hit_chance(&sharp, 1.0, 0.0, 0.0, &config), Some(0.95));
        assert_eq!(hit_chance(&gun(), 1.0, 0.0, 99.0, &config), Some(0.1));
    }

    #[test]
    fn test_shot_damage_scales() {
        let damage = shot_damage(&gun(), 0.5, 50.0);
        assert!((damage.amount - 10.0).abs() < 1e-6);
        assert_eq!(damage.damage_type, DamageType::Kinetic);
        assert_eq!(damage.armor_penetration, 25.0);
    }

    #[test]
    fn test_sustained_output_includes_fire_rate() {
        assert!((sustained_output(&gun(), 1.0, 100.0) - 80.0).abs() < 1e-6);
    }
}
