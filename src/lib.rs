//! Starfleet Combat - ship design, fleet upkeep and battle resolution
//!
//! Configuration flows top-down: a module catalog feeds ship designs, and
//! designs are instantiated as ships. Turn processing flows bottom-up:
//! `Ship::turn` is driven by `Fleet::turn`, which the external scheduler
//! drives. Battles are resolved on demand when hostile forces meet.

pub mod battle;
pub mod core;
pub mod design;
pub mod fleet;
pub mod modules;
pub mod services;
pub mod ship;
