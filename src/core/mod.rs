pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{config, set_config, CombatConfig};
pub use error::{DesignError, FleetError, Result};
pub use types::{FactionId, FleetId, LocationId, ResourceKind, ShipId, Turn};
