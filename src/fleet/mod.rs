//! Fleets: ship groups with shared supply, missions and aggregate stats

#[allow(clippy::module_inception)]
pub mod fleet;
pub mod mission;
pub mod stats;
pub mod supply;

pub use fleet::{faction_power, Fleet, FleetTurnReport};
pub use mission::{Mission, MissionEvent};
pub use stats::FleetStats;
pub use supply::{FleetSupply, SupplyShortage};
