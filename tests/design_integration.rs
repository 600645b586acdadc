//! Catalog, design and configuration integration tests

use std::collections::HashSet;

use starfleet_combat::core::{CombatConfig, DesignError, FleetError};
use starfleet_combat::design::{HullClass, ShipDesign};
use starfleet_combat::modules::{specials, ModuleCatalog, ModuleVariant};
use starfleet_combat::services::{AllUnlocked, NothingUnlocked};

const SIEGE_CATALOG: &str = r#"
[[modules]]
name = "Spinal Lance"
space = 1000
power = 150.0

[modules.kind]
variant = "weapon"
category = "plasma"
damage = 900.0
range = 400.0
accuracy = 60.0
armor_penetration = 80.0

[[modules]]
name = "Bulk Sensor Mast"
space = 60
power = 10.0

[modules.kind]
variant = "utility"
category = "sensor"
value = 1200.0
"#;

#[test]
fn test_bare_cruiser_is_valid() {
    let design = ShipDesign::new("Empty Cruiser", HullClass::Cruiser);
    assert_eq!(design.hull_space_capacity(), 900);
    assert_eq!(design.used_hull_space(), 0);
    assert!(design.is_valid());
}

#[test]
fn test_oversized_catalog_module_reports_overload() {
    let mut catalog = ModuleCatalog::standard();
    catalog.load_str(SIEGE_CATALOG).unwrap();

    let mut design = ShipDesign::new("Siege Cruiser", HullClass::Cruiser);
    let lance = catalog.instantiate("Spinal Lance").unwrap();
    let err = design.add_module(lance, &AllUnlocked).unwrap_err();

    assert!(matches!(err, DesignError::InsufficientSpace { overload: 100, .. }));
    assert!(design.validation_message().contains("overloaded by 100 units"));
    assert_eq!(design.weapon_count(), 0);
}

#[test]
fn test_build_design_propagates_errors() {
    let catalog = ModuleCatalog::standard();

    let unknown = catalog.build_design("Typo", HullClass::Frigate, &["Pulse Lazer"], &AllUnlocked);
    assert!(matches!(unknown, Err(FleetError::UnknownModule(ref name)) if name == "Pulse Lazer"));

    let locked = catalog.build_design(
        "Cloaked",
        HullClass::Frigate,
        &["Cloaking Device"],
        &NothingUnlocked,
    );
    assert!(matches!(
        locked,
        Err(FleetError::Design(DesignError::TechLocked { .. }))
    ));
}

#[test]
fn test_tech_unlocks_from_research_set() {
    let catalog = ModuleCatalog::standard();
    let mut researched: HashSet<String> = HashSet::new();
    researched.insert("plasma_physics".to_string());

    let mut design = ShipDesign::new("Lancer", HullClass::Destroyer);
    let plasma = catalog.instantiate("Plasma Cannon").unwrap();
    let torpedo = catalog.instantiate("Torpedo Tube").unwrap();

    assert!(design.add_module(plasma, &researched).is_ok());
    assert!(matches!(
        design.add_module(torpedo, &researched),
        Err(DesignError::TechLocked { ref tech, .. }) if tech == "heavy_ordnance"
    ));
}

#[test]
fn test_full_design_aggregates() {
    let catalog = ModuleCatalog::standard();
    let design = catalog
        .build_design(
            "Pathfinder",
            HullClass::Destroyer,
            &[
                "Chemical Thruster",
                "Fission Reactor",
                "Pulse Laser",
                "Deflector Shield",
                "Composite Armor",
                "Sensor Array",
                "Sensor Array",
                "Repair Bay",
                "Fuel Tank",
            ],
            &NothingUnlocked,
        )
        .unwrap();

    let base = HullClass::Destroyer.base_stats();
    assert_eq!(design.stats().shield, base.shield + 200.0);
    assert_eq!(design.stats().armor, base.armor + 100.0);
    assert_eq!(design.stats().fuel_capacity, base.fuel_capacity + 50.0 + 300.0);
    assert_eq!(design.special(specials::DETECTION_RANGE), 600.0);
    assert_eq!(design.special(specials::REPAIR_RATE), 5.0);
    assert_eq!(design.special("warp_field"), 0.0);
    assert_eq!(design.modules_of(ModuleVariant::Utility).count(), 4);
    assert_eq!(design.used_hull_space(), 40 + 50 + 30 + 40 + 50 + 20 + 20 + 60 + 30);
    assert!(design.available_power() > 0.0);

    let module_metal: f32 = design.modules().iter().map(|m| m.construction_cost.metal).sum();
    assert_eq!(
        design.construction_cost().metal,
        module_metal + base.hull_space as f32 * 0.5
    );
}

#[test]
fn test_refit_workflow() {
    let catalog = ModuleCatalog::standard();
    let original = catalog
        .build_design(
            "Warden",
            HullClass::Frigate,
            &["Chemical Thruster", "Fission Reactor", "Railgun", "Railgun"],
            &AllUnlocked,
        )
        .unwrap();

    let mut refit = original.derive_variant("Warden B");
    let slot = refit
        .modules()
        .iter()
        .position(|m| m.name == "Railgun")
        .unwrap();
    refit.remove_module(slot).unwrap();
    refit
        .add_module(catalog.instantiate("Missile Launcher").unwrap(), &AllUnlocked)
        .unwrap();

    assert_eq!(refit.version, original.version + 1);
    assert_eq!(original.weapon_count(), 2);
    assert_eq!(refit.weapon_count(), 2);
    assert!(refit.weapons().any(|(_, w)| w.ammo.is_some()));
    assert_ne!(refit.construction_cost(), original.construction_cost());
}

#[test]
fn test_force_install_then_trim() {
    let catalog = ModuleCatalog::standard();
    let mut design = ShipDesign::new("Overbuilt", HullClass::Corvette);
    for _ in 0..5 {
        design.force_install(catalog.instantiate("Plasma Cannon").unwrap());
    }
    assert_eq!(design.used_hull_space(), 300);
    assert!(!design.is_valid());
    assert!(design.ensure_buildable().is_err());

    while design.used_hull_space() > design.hull_space_capacity() {
        let last = design.modules().len() - 1;
        design.remove_module(last).unwrap();
    }
    assert!(design.is_valid());
    assert_eq!(design.weapon_count(), 3);
}

#[test]
fn test_catalog_directory_loading() {
    let dir = std::env::temp_dir().join(format!("starfleet-catalog-{}", std::process::id()));
    let nested = dir.join("siege");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("siege.toml"), SIEGE_CATALOG).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a catalog").unwrap();

    let mut catalog = ModuleCatalog::new();
    let loaded = catalog.load_directory(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(loaded, 2);
    assert!(catalog.get("Bulk Sensor Mast").is_some());
    assert_eq!(catalog.of_variant(ModuleVariant::Weapon).count(), 1);
}

#[test]
fn test_catalog_rejects_malformed_toml() {
    let mut catalog = ModuleCatalog::new();
    let result = catalog.load_str("[[modules]]\nname = \"Broken\"\n");
    assert!(matches!(result, Err(FleetError::TomlError(_))));
    assert!(catalog.is_empty());
}

#[test]
fn test_config_overrides_from_toml() {
    let config = CombatConfig::from_toml_str(
        r#"
max_skirmish_rounds = 10
module_hits_max = 2
"#,
    )
    .unwrap();
    assert_eq!(config.max_skirmish_rounds, 10);
    assert_eq!(config.module_hits_max, 2);
    assert_eq!(config.min_hit_chance, CombatConfig::default().min_hit_chance);

    let invalid = CombatConfig::from_toml_str("module_hits_min = 4\nmodule_hits_max = 2\n");
    assert!(matches!(invalid, Err(FleetError::InvalidConfig(_))));
}
