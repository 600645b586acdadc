//! Cached fleet aggregates

use serde::{Deserialize, Serialize};

use crate::ship::unit::Ship;

/// Aggregate statistics, refreshed by `Fleet::recompute_stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetStats {
    pub ship_count: usize,
    /// Sum of ship damage output
    pub total_combat_power: f32,
    /// Mean warp speed across ships, 0 for an empty fleet
    pub average_speed: f32,
    /// Best detection range in the fleet
    pub detection_range: f32,
    /// Fuel burned per turn while moving
    pub fuel_burn_rate: f32,
    pub total_crew: u32,
    pub total_power_draw: f32,
}

impl FleetStats {
    pub fn from_ships<'a>(ships: impl IntoIterator<Item = &'a Ship>) -> Self {
        let mut stats = FleetStats::default();
        let mut speed_sum = 0.0;

        for ship in ships.into_iter().filter(|s| !s.is_destroyed()) {
            stats.ship_count += 1;
            stats.total_combat_power += ship.damage_output();
            speed_sum += ship.warp_speed();
            stats.detection_range = stats.detection_range.max(ship.detection_range());
            stats.fuel_burn_rate += ship.fuel_burn_rate();
            stats.total_crew += ship.crew();
            stats.total_power_draw += ship.power_draw();
        }

        if stats.ship_count > 0 {
            stats.average_speed = speed_sum / stats.ship_count as f32;
        }
        stats
    }
}
