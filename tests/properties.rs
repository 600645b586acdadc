//! Property tests for design aggregation and damage resolution

use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starfleet_combat::core::{CombatConfig, FactionId};
use starfleet_combat::design::{HullClass, ShipDesign};
use starfleet_combat::modules::ModuleCatalog;
use starfleet_combat::services::AllUnlocked;
use starfleet_combat::ship::{Damage, DamageType, Ship};

fn hull_class() -> impl Strategy<Value = HullClass> {
    prop::sample::select(HullClass::all().to_vec())
}

fn assembled(hull: HullClass, picks: &[usize]) -> ShipDesign {
    let catalog = ModuleCatalog::standard();
    let templates = catalog.templates();
    let mut design = ShipDesign::new("Prop", hull);
    for &pick in picks {
        design.force_install(templates[pick % templates.len()].clone());
    }
    design
}

fn escort() -> Arc<ShipDesign> {
    let design = ModuleCatalog::standard()
        .build_design(
            "Escort",
            HullClass::Destroyer,
            &[
                "Chemical Thruster",
                "Fission Reactor",
                "Pulse Laser",
                "Railgun",
                "Deflector Shield",
                "Composite Armor",
                "Sensor Array",
            ],
            &AllUnlocked,
        )
        .unwrap();
    Arc::new(design)
}

proptest! {
    #[test]
    fn recompute_is_idempotent(hull in hull_class(), picks in prop::collection::vec(0usize..64, 0..16)) {
        let mut design = assembled(hull, &picks);
        let before = design.clone();
        design.recompute();
        prop_assert_eq!(&design, &before);
        design.recompute();
        prop_assert_eq!(&design, &before);
    }

    #[test]
    fn validity_tracks_hull_space(hull in hull_class(), picks in prop::collection::vec(0usize..64, 0..24)) {
        let design = assembled(hull, &picks);
        prop_assert_eq!(
            design.is_valid(),
            design.used_hull_space() <= design.hull_space_capacity()
        );
        prop_assert_eq!(design.ensure_buildable().is_ok(), design.is_valid());
    }

    #[test]
    fn full_penetration_ignores_armor(amount in 0.0f32..5000.0, armor in 0.0f32..5000.0) {
        let hit = Damage::new(amount, DamageType::Kinetic, 100.0);
        prop_assert_eq!(hit.effective_against(armor), amount);
    }

    #[test]
    fn mitigation_stays_within_floor_and_amount(amount in 0.0f32..5000.0, armor in 0.0f32..5000.0) {
        let hit = Damage::new(amount, DamageType::Energy, 0.0);
        let through = hit.effective_against(armor);
        prop_assert!(through <= amount);
        prop_assert!(through >= amount * 0.1 - 1e-3);
        let expected = (amount * 0.1).max(amount - armor);
        prop_assert!((through - expected).abs() < 1e-2, "{} != {}", through, expected);
    }

    #[test]
    fn hits_keep_ship_within_bounds(
        seed in any::<u64>(),
        hits in prop::collection::vec((0.0f32..800.0, 0.0f32..100.0), 1..20),
    ) {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ship = Ship::new("Target", escort(), FactionId(1));

        for (amount, penetration) in hits {
            let crew_before = ship.crew();
            let hp_before = ship.hit_points();
            let report = ship.take_damage(
                &Damage::new(amount, DamageType::Kinetic, penetration),
                &config,
                &mut rng,
            );

            prop_assert!(ship.hit_points() >= 0.0 && ship.hit_points() <= hp_before);
            prop_assert!(ship.shield() >= 0.0);
            prop_assert!(ship.armor() >= 0.0);
            prop_assert!((0.0..=100.0).contains(&ship.integrity()));
            prop_assert!(ship.crew() <= crew_before);
            prop_assert!(
                report.shield_absorbed + report.armor_absorbed + report.hull_damage <= amount + 1e-2
            );
            for status in ship.module_statuses() {
                prop_assert!((0.0..=100.0).contains(&status.integrity));
            }
            if ship.is_destroyed() {
                break;
            }
        }
    }
}
