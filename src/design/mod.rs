//! Ship designs: hull classes, installed modules and derived totals

pub mod cost;
pub mod hull;
pub mod ship_design;

pub use cost::ResourceCost;
pub use hull::{HullClass, HullStats};
pub use ship_design::{DesignStats, ShipDesign};
