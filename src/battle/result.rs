//! Battle outcomes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;
use crate::fleet::fleet::Fleet;

/// Which resolver produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleKind {
    Skirmish,
    Duel,
    InstallationAssault,
}

/// Losses suffered by one faction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactionLosses {
    pub faction: FactionId,
    pub ships_lost: usize,
    pub health_lost: f32,
}

/// Outcome of a resolved battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub kind: BattleKind,
    /// `None` is a draw
    pub winner: Option<FactionId>,
    /// Skirmish rounds, or damage passes for the aggregate resolvers
    pub rounds: u32,
    /// Ordered by faction
    pub losses: Vec<FactionLosses>,
    pub damage_to_defender: f32,
    pub damage_to_attacker: f32,
    pub defender_destroyed: bool,
}

impl BattleResult {
    pub fn new(kind: BattleKind) -> Self {
        Self {
            kind,
            winner: None,
            rounds: 0,
            losses: Vec::new(),
            damage_to_defender: 0.0,
            damage_to_attacker: 0.0,
            defender_destroyed: false,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn losses_for(&self, faction: FactionId) -> Option<&FactionLosses> {
        self.losses.iter().find(|l| l.faction == faction)
    }

    pub fn ships_lost(&self, faction: FactionId) -> usize {
        self.losses_for(faction).map_or(0, |l| l.ships_lost)
    }

    /// Human readable one-liner
    pub fn summary(&self) -> String {
        let winner = match self.winner {
            Some(faction) => format!("{} wins", faction),
            None => "draw".to_string(),
        };
        let losses: Vec<String> = self
            .losses
            .iter()
            .map(|l| format!("{} lost {} ships ({:.0} hp)", l.faction, l.ships_lost, l.health_lost))
            .collect();
        format!(
            "{:?} after {} rounds: {}; {}",
            self.kind,
            self.rounds,
            winner,
            losses.join(", ")
        )
    }
}

/// Alive ship count and hit points per faction, taken before and after a battle
#[derive(Debug, Clone, Default)]
pub(crate) struct ForceTally {
    by_faction: BTreeMap<FactionId, (usize, f32)>,
}

impl ForceTally {
    pub(crate) fn of<'a>(fleets: impl IntoIterator<Item = &'a Fleet>) -> Self {
        let mut tally = Self::default();
        for fleet in fleets {
            tally.record(fleet.faction, fleet.alive_count(), fleet.total_health());
        }
        tally
    }

    pub(crate) fn record(&mut self, faction: FactionId, ships: usize, health: f32) {
        let entry = self.by_faction.entry(faction).or_insert((0, 0.0));
        entry.0 += ships;
        entry.1 += health;
    }

    /// Factions that still have ships
    pub(crate) fn standing(&self) -> Vec<FactionId> {
        self.by_faction
            .iter()
            .filter(|(_, (ships, _))| *ships > 0)
            .map(|(faction, _)| *faction)
            .collect()
    }

    /// Per-faction difference from `before` to `self`
    pub(crate) fn losses_since(&self, before: &ForceTally) -> Vec<FactionLosses> {
        before
            .by_faction
            .iter()
            .map(|(faction, (ships, health))| {
                let (ships_after, health_after) =
                    self.by_faction.get(faction).copied().unwrap_or((0, 0.0));
                FactionLosses {
                    faction: *faction,
                    ships_lost: ships.saturating_sub(ships_after),
                    health_lost: (health - health_after).max(0.0),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_losses_since() {
        let mut before = ForceTally::default();
        before.record(FactionId(1), 3, 3000.0);
        before.record(FactionId(2), 2, 1000.0);

        let mut after = ForceTally::default();
        after.record(FactionId(1), 2, 1500.0);

        let losses = after.losses_since(&before);
        assert_eq!(losses.len(), 2);
        assert_eq!(losses[0].ships_lost, 1);
        assert_eq!(losses[0].health_lost, 1500.0);
        assert_eq!(losses[1].ships_lost, 2);
        assert_eq!(after.standing(), vec![FactionId(1)]);
    }

    #[test]
    fn test_summary_mentions_winner() {
        let mut result = BattleResult::new(BattleKind::Duel);
        result.winner = Some(FactionId(7));
        result.losses.push(FactionLosses {
            faction: FactionId(3),
            ships_lost: 2,
            health_lost: 900.0,
        });
        let text = result.summary();
        assert!(text.contains("faction-7 wins"));
        assert!(text.contains("lost 2 ships"));
        assert!(!result.is_draw());
        assert_eq!(result.ships_lost(FactionId(3)), 2);
    }

    #[test]
    fn test_losses_roundtrip_through_json() {
        let losses = FactionLosses {
            faction: FactionId(4),
            ships_lost: 1,
            health_lost: 250.0,
        };
        let json = serde_json::to_string(&losses).unwrap();
        let back: FactionLosses = serde_json::from_str(&json).unwrap();
        assert_eq!(back, losses);
        assert_eq!(BattleResult::new(BattleKind::Skirmish).ships_lost(FactionId(4)), 0);
    }
}
