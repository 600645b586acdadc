//! Headless Battle Runner
//!
//! Builds two opposing fleets from the module catalog, runs a few upkeep
//! turns, resolves one battle and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use starfleet_combat::battle::{
    resolve_fleet_duel, resolve_installation_assault, resolve_skirmish, BattleResult, Outpost,
};
use starfleet_combat::core::rng::seeded;
use starfleet_combat::core::{config, set_config, CombatConfig, FactionId, LocationId, Result};
use starfleet_combat::design::{HullClass, ShipDesign};
use starfleet_combat::fleet::Fleet;
use starfleet_combat::modules::ModuleCatalog;
use starfleet_combat::services::{AllUnlocked, MapIntel};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Mode {
    Skirmish,
    Duel,
    Assault,
}

/// Headless Battle Runner - resolve one fleet battle and report the outcome
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve a fleet battle and print the result")]
struct Args {
    /// Battle resolver to use
    #[arg(long, value_enum, default_value_t = Mode::Skirmish)]
    mode: Mode,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Upkeep turns to run before the battle
    #[arg(long, default_value_t = 3)]
    turns: u32,

    /// Ships per side
    #[arg(long, default_value_t = 4)]
    ships: usize,

    /// Combat config overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra module templates (TOML)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RunnerOutput {
    mode: Mode,
    seed: u64,
    turns: u32,
    result: Option<BattleResult>,
    fleets: Vec<String>,
}

/// Everything stays where it is
struct Anchored;

impl MapIntel for Anchored {
    fn patrol_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        None
    }
    fn exploration_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        None
    }
    fn defense_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        None
    }
    fn attack_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        None
    }
    fn retreat_target(&self, _: LocationId, _: FactionId) -> Option<LocationId> {
        None
    }
    fn next_step(&self, _: LocationId, to: LocationId) -> Option<LocationId> {
        Some(to)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starfleet_combat=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = seeded(seed);

    if let Some(path) = &args.config {
        let loaded = CombatConfig::load(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("Combat config already set, ignoring {}", path.display());
        }
    }
    let cfg = config();

    let mut catalog = ModuleCatalog::standard();
    if let Some(path) = &args.catalog {
        catalog.load_file(path)?;
    }

    let lancer = Arc::new(lancer(&catalog)?);
    let warden = Arc::new(warden(&catalog)?);
    tracing::info!("{}", lancer.summary());
    tracing::info!("{}", warden.summary());

    let here = LocationId(0);
    let mut fleets = vec![
        Fleet::new("Vanguard", FactionId(1), here),
        Fleet::new("Bulwark", FactionId(2), here),
    ];
    for i in 0..args.ships {
        fleets[0].commission(&lancer, format!("Lancer {}", i + 1))?;
        fleets[1].commission(&warden, format!("Warden {}", i + 1))?;
    }

    for _ in 0..args.turns {
        for fleet in fleets.iter_mut() {
            fleet.turn(&Anchored, cfg);
        }
    }

    let result = match args.mode {
        Mode::Skirmish => resolve_skirmish(&mut fleets, cfg, &mut rng),
        Mode::Duel => {
            let (left, right) = fleets.split_at_mut(1);
            resolve_fleet_duel(&mut left[0], &mut right[0])
        }
        Mode::Assault => {
            let mut colony = Outpost::new("Tannhauser Colony", FactionId(2), 6000.0, 150.0);
            resolve_installation_assault(&mut fleets[0], &mut colony, cfg)
        }
    };

    let output = RunnerOutput {
        mode: args.mode,
        seed,
        turns: args.turns,
        result,
        fleets: fleets.iter().map(Fleet::status_summary).collect(),
    };

    match args.format.as_str() {
        "text" => print_text(&output),
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_text(output: &RunnerOutput) {
    println!("Battle Result");
    println!("=============");
    println!("Mode: {:?}", output.mode);
    match &output.result {
        Some(result) => println!("{}", result.summary()),
        None => println!("No battle took place"),
    }
    println!();
    for line in &output.fleets {
        println!("{}", line);
    }
    println!();
    println!("Seed: {}", output.seed);
}

/// Fast line destroyer with kinetic and laser armament
fn lancer(catalog: &ModuleCatalog) -> Result<ShipDesign> {
    catalog.build_design(
        "Lancer",
        HullClass::Destroyer,
        &[
            "Ion Drive",
            "Fission Reactor",
            "Railgun",
            "Railgun",
            "Pulse Laser",
            "Pulse Laser",
            "Deflector Shield",
            "Composite Armor",
            "Sensor Array",
        ],
        &AllUnlocked,
    )
}

/// Heavily armored missile frigate
fn warden(catalog: &ModuleCatalog) -> Result<ShipDesign> {
    catalog.build_design(
        "Warden",
        HullClass::Frigate,
        &[
            "Chemical Thruster",
            "Fusion Reactor",
            "Plasma Cannon",
            "Missile Launcher",
            "Ablative Plating",
            "Flak Battery",
            "Crew Quarters",
        ],
        &AllUnlocked,
    )
}
