//! Runtime ships: damage resolution, weapon fire and per-turn upkeep

pub mod constants;
pub mod damage;
pub mod status;
pub mod supplies;
pub mod unit;
pub mod weapons;

pub use damage::{Damage, DamageType};
pub use status::{ModuleState, ModuleStatus};
pub use supplies::{Magazines, ShipSupplies, SupplyDraw};
pub use unit::{HitReport, Ship, ShipTurnReport};
pub use weapons::VolleyReport;
