//! Battle resolution
//!
//! Three separate resolvers, each invoked on demand by the scheduler when
//! hostile forces share a location:
//! - free-for-all skirmish with per-ship weapon fire
//! - single-exchange fleet duel on aggregate power
//! - fleet assault on a defended installation
//!
//! Invalid requests (empty side, same faction) return `None` and log a warning.

pub mod duel;
pub mod installation;
pub mod result;
pub mod skirmish;

pub use duel::resolve_fleet_duel;
pub use installation::{resolve_installation_assault, Outpost, INSTALLATION_COUNTER_RATIO};
pub use result::{BattleKind, BattleResult, FactionLosses};
pub use skirmish::{resolve_skirmish, MAX_SKIRMISH_ROUNDS};
