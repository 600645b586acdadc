//! Single-exchange fleet duel
//!
//! One aggregate pass of attacker power against the defender's combined
//! armor, then one counter pass if the defender is still standing. Damage is
//! spread over ships in order, each soaking up to its remaining hit points.

use crate::battle::result::{BattleKind, BattleResult, ForceTally};
use crate::fleet::fleet::Fleet;

/// Power left after the target's combined armor
pub fn pass_damage(power: f32, armor: f32) -> f32 {
    (power - armor).max(0.0)
}

/// Resolve one attack and at most one counter-attack
pub fn resolve_fleet_duel(attacker: &mut Fleet, defender: &mut Fleet) -> Option<BattleResult> {
    if !attacker.has_alive_ships() || !defender.has_alive_ships() {
        tracing::warn!(
            "Duel refused: {} vs {} has an empty side",
            attacker.name,
            defender.name
        );
        return None;
    }
    if attacker.faction == defender.faction {
        tracing::warn!(
            "Duel refused: {} and {} both belong to {}",
            attacker.name,
            defender.name,
            attacker.faction
        );
        return None;
    }

    attacker.recompute_stats();
    defender.recompute_stats();

    let before = ForceTally::of([&*attacker, &*defender]);
    let mut result = BattleResult::new(BattleKind::Duel);

    let attack = pass_damage(attacker.total_combat_power(), defender.total_armor());
    result.damage_to_defender = defender.take_distributed_damage(attack);
    result.rounds = 1;
    tracing::debug!("{} deals {:.1} to {}", attacker.name, result.damage_to_defender, defender.name);

    if defender.has_alive_ships() {
        defender.recompute_stats();
        let counter = pass_damage(defender.total_combat_power(), attacker.total_armor());
        result.damage_to_attacker = attacker.take_distributed_damage(counter);
        result.rounds = 2;
        tracing::debug!("{} counters for {:.1}", defender.name, result.damage_to_attacker);
    }

    let after = ForceTally::of([&*attacker, &*defender]);
    result.losses = after.losses_since(&before);
    result.defender_destroyed = !defender.has_alive_ships();
    result.winner = match (attacker.has_alive_ships(), defender.has_alive_ships()) {
        (true, false) => Some(attacker.faction),
        (false, true) => Some(defender.faction),
        _ => None,
    };

    attacker.remove_destroyed();
    defender.remove_destroyed();

    tracing::info!("{}", result.summary());
    Some(result)
}
