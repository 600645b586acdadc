//! Free-for-all skirmish between every fleet at one location
//!
//! Each round every ship alive at the start of the round fires once, in fleet
//! order then ship order, at the first living enemy. The round cap keeps the
//! loop finite even when nobody can hurt anybody.

use rand::Rng;

use crate::battle::result::{BattleKind, BattleResult, ForceTally};
use crate::core::config::CombatConfig;
use crate::fleet::fleet::Fleet;

/// Round cap for skirmishes
pub const MAX_SKIRMISH_ROUNDS: u32 = 50;

/// Every ship in a skirmish shares one location
pub const SKIRMISH_DISTANCE: f32 = 0.0;

/// Fight until one faction is left or the round cap is reached
///
/// Destroyed ships are removed from their fleets afterwards. Returns `None`
/// when there is nobody to fight.
pub fn resolve_skirmish<R: Rng + ?Sized>(
    fleets: &mut [Fleet],
    config: &CombatConfig,
    rng: &mut R,
) -> Option<BattleResult> {
    if !fleets.iter().any(Fleet::has_alive_ships) {
        tracing::warn!("Skirmish refused: no ships present");
        return None;
    }

    let before = ForceTally::of(fleets.iter());
    let mut result = BattleResult::new(BattleKind::Skirmish);

    let mut standing = before.standing();
    if standing.len() <= 1 {
        result.winner = standing.first().copied();
        result.losses = before.losses_since(&before);
        return Some(result);
    }

    tracing::debug!(
        "Skirmish between {} factions across {} fleets",
        standing.len(),
        fleets.len()
    );

    for round in 1..=config.max_skirmish_rounds {
        result.rounds = round;

        let order: Vec<(usize, usize)> = fleets
            .iter()
            .enumerate()
            .flat_map(|(fi, fleet)| {
                fleet
                    .ships()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| !s.is_destroyed())
                    .map(move |(si, _)| (fi, si))
            })
            .collect();

        for (fi, si) in order {
            if fleets[fi].ships()[si].is_destroyed() {
                continue;
            }
            let (ti, ts) = match first_enemy(fleets, fi) {
                Some(target) => target,
                None => break,
            };

            let (shooter_fleet, target_fleet) = pair_mut(fleets, fi, ti);
            let shooter = &mut shooter_fleet.ships_mut()[si];
            let target = &mut target_fleet.ships_mut()[ts];
            shooter.fire_at(target, SKIRMISH_DISTANCE, config, rng);
        }

        standing = ForceTally::of(fleets.iter()).standing();
        if standing.len() <= 1 {
            break;
        }
    }

    let after = ForceTally::of(fleets.iter());
    result.losses = after.losses_since(&before);
    result.winner = match standing.as_slice() {
        [sole] => Some(*sole),
        _ => None,
    };

    for fleet in fleets.iter_mut() {
        fleet.remove_destroyed();
    }

    tracing::info!("{}", result.summary());
    Some(result)
}

/// First living ship belonging to a faction other than fleet `fi`'s
fn first_enemy(fleets: &[Fleet], fi: usize) -> Option<(usize, usize)> {
    let faction = fleets[fi].faction;
    fleets
        .iter()
        .enumerate()
        .filter(|(_, f)| f.faction != faction)
        .find_map(|(ti, f)| {
            f.ships()
                .iter()
                .position(|s| !s.is_destroyed())
                .map(|ts| (ti, ts))
        })
}

/// Two distinct fleets borrowed mutably at once
fn pair_mut(fleets: &mut [Fleet], a: usize, b: usize) -> (&mut Fleet, &mut Fleet) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = fleets.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = fleets.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::types::{FactionId, LocationId};
    use crate::design::hull::HullClass;
    use crate::modules::catalog::ModuleCatalog;
    use crate::services::NothingUnlocked;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fleet(faction: u32, ships: usize) -> Fleet {
        let design = Arc::new(
            ModuleCatalog::standard()
                .build_design(
                    "Gunboat",
                    HullClass::Corvette,
                    &["Chemical Thruster", "Pulse Laser", "Pulse Laser", "Mass Driver"],
                    &NothingUnlocked,
                )
                .unwrap(),
        );
        let mut fleet = Fleet::new(format!("Fleet {}", faction), FactionId(faction), LocationId(0));
        for i in 0..ships {
            fleet.commission(&design, format!("Gunboat {}", i)).unwrap();
        }
        fleet
    }

    #[test]
    fn test_no_ships_is_refused() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut fleets = vec![fleet(1, 0), fleet(2, 0)];
        assert!(resolve_skirmish(&mut fleets, &CombatConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn test_single_faction_wins_without_fighting() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut fleets = vec![fleet(1, 2), fleet(1, 1)];
        let result = resolve_skirmish(&mut fleets, &CombatConfig::default(), &mut rng).unwrap();
        assert_eq!(result.rounds, 0);
        assert_eq!(result.winner, Some(FactionId(1)));
        assert_eq!(result.ships_lost(FactionId(1)), 0);
    }

    #[test]
    fn test_outnumbered_side_loses() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut fleets = vec![fleet(1, 6), fleet(2, 1)];
        let result = resolve_skirmish(&mut fleets, &CombatConfig::default(), &mut rng).unwrap();
        assert!(result.rounds >= 1 && result.rounds <= MAX_SKIRMISH_ROUNDS);
        assert_eq!(result.winner, Some(FactionId(1)));
        assert_eq!(result.ships_lost(FactionId(2)), 1);
        assert!(fleets[1].is_empty());
    }

    #[test]
    fn test_round_cap_ends_stalemate() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = CombatConfig {
            max_skirmish_rounds: 1,
            ..CombatConfig::default()
        };
        let mut fleets = vec![fleet(1, 3), fleet(2, 3)];
        let result = resolve_skirmish(&mut fleets, &config, &mut rng).unwrap();
        assert_eq!(result.rounds, 1);
        assert!(result.is_draw());
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut fleets = vec![fleet(1, 0), fleet(2, 0), fleet(3, 0)];
        let (a, b) = pair_mut(&mut fleets, 2, 0);
        assert_eq!(a.faction, FactionId(3));
        assert_eq!(b.faction, FactionId(1));
    }
}
