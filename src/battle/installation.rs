//! Fleet assault on a defended installation (colony, station, outpost)

use serde::{Deserialize, Serialize};

use crate::battle::duel::pass_damage;
use crate::battle::result::{BattleKind, BattleResult, FactionLosses, ForceTally};
use crate::core::config::CombatConfig;
use crate::core::types::FactionId;
use crate::fleet::fleet::Fleet;
use crate::services::Installation;

/// Counter-attack power as a fraction of defense strength
pub const INSTALLATION_COUNTER_RATIO: f32 = 0.5;

/// Plain installation with a health pool and a flat defense value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outpost {
    pub name: String,
    pub faction: FactionId,
    pub health: f32,
    pub max_health: f32,
    pub defense: f32,
}

impl Outpost {
    pub fn new(name: impl Into<String>, faction: FactionId, max_health: f32, defense: f32) -> Self {
        Self {
            name: name.into(),
            faction,
            health: max_health,
            max_health,
            defense,
        }
    }
}

impl Installation for Outpost {
    fn faction(&self) -> FactionId {
        self.faction
    }

    fn current_health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        let applied = amount.max(0.0).min(self.health);
        self.health -= applied;
        applied
    }

    fn defense_strength(&self) -> f32 {
        self.defense
    }
}

/// One attack pass against the installation, then its counter-fire
///
/// The counter is a fraction of defense strength and is not reduced by the
/// attackers' armor.
pub fn resolve_installation_assault<I: Installation + ?Sized>(
    attacker: &mut Fleet,
    target: &mut I,
    config: &CombatConfig,
) -> Option<BattleResult> {
    if !attacker.has_alive_ships() {
        tracing::warn!("Assault refused: {} has no ships", attacker.name);
        return None;
    }
    if attacker.faction == target.faction() {
        tracing::warn!("Assault refused: {} would attack its own installation", attacker.name);
        return None;
    }
    if target.is_destroyed() {
        tracing::warn!("Assault refused: target is already destroyed");
        return None;
    }

    attacker.recompute_stats();
    let before = ForceTally::of([&*attacker]);
    let defender_health = target.current_health();
    let mut result = BattleResult::new(BattleKind::InstallationAssault);

    let attack = pass_damage(attacker.total_combat_power(), target.defense_strength());
    result.damage_to_defender = target.take_damage(attack);
    result.rounds = 1;

    if !target.is_destroyed() {
        let counter = target.defense_strength() * config.installation_counter_ratio;
        result.damage_to_attacker = attacker.take_distributed_damage(counter);
        result.rounds = 2;
    }

    let after = ForceTally::of([&*attacker]);
    result.losses = after.losses_since(&before);
    result.losses.push(FactionLosses {
        faction: target.faction(),
        ships_lost: 0,
        health_lost: (defender_health - target.current_health()).max(0.0),
    });
    result.losses.sort_by_key(|l| l.faction);

    result.defender_destroyed = target.is_destroyed();
    result.winner = if result.defender_destroyed {
        Some(attacker.faction)
    } else if !attacker.has_alive_ships() {
        Some(target.faction())
    } else {
        None
    };

    attacker.remove_destroyed();

    tracing::info!("{}", result.summary());
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outpost_absorbs_up_to_health() {
        let mut outpost = Outpost::new("Relay", FactionId(2), 100.0, 20.0);
        assert_eq!(outpost.take_damage(150.0), 100.0);
        assert!(outpost.is_destroyed());
        assert_eq!(outpost.health_percentage(), 0.0);
    }

    #[test]
    fn test_outpost_ignores_negative_damage() {
        let mut outpost = Outpost::new("Relay", FactionId(2), 100.0, 20.0);
        assert_eq!(outpost.take_damage(-5.0), 0.0);
        assert_eq!(outpost.health_percentage(), 100.0);
    }
}
