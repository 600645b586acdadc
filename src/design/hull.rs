//! Hull classes and their base statistics
//!
//! A design starts from its hull class base stats and adds module bonuses on
//! top. Base stats can be overridden per design for custom or modded hulls.

use serde::{Deserialize, Serialize};

/// Size classes for ship hulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullClass {
    Corvette,
    Frigate,
    Destroyer,
    Cruiser,
    Battleship,
    Carrier,
    Freighter,
}

/// Base statistics of a bare hull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullStats {
    pub hit_points: f32,
    pub armor: f32,
    pub shield: f32,
    pub evasion: f32,
    pub engine_power: f32,
    pub warp_speed: f32,
    pub maneuverability: f32,
    pub crew_capacity: u32,
    pub cargo_capacity: u32,
    pub fuel_capacity: f32,
    /// Space available for non-hull modules
    pub hull_space: u32,
    pub power_output: f32,
}

impl HullClass {
    pub fn all() -> &'static [HullClass] {
        &[
            HullClass::Corvette,
            HullClass::Frigate,
            HullClass::Destroyer,
            HullClass::Cruiser,
            HullClass::Battleship,
            HullClass::Carrier,
            HullClass::Freighter,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HullClass::Corvette => "Corvette",
            HullClass::Frigate => "Frigate",
            HullClass::Destroyer => "Destroyer",
            HullClass::Cruiser => "Cruiser",
            HullClass::Battleship => "Battleship",
            HullClass::Carrier => "Carrier",
            HullClass::Freighter => "Freighter",
        }
    }

    pub fn base_stats(&self) -> HullStats {
        match self {
            HullClass::Corvette => HullStats {
                hit_points: 300.0,
                armor: 20.0,
                shield: 0.0,
                evasion: 30.0,
                engine_power: 50.0,
                warp_speed: 3.0,
                maneuverability: 80.0,
                crew_capacity: 20,
                cargo_capacity: 20,
                fuel_capacity: 200.0,
                hull_space: 200,
                power_output: 40.0,
            },
            HullClass::Frigate => HullStats {
                hit_points: 600.0,
                armor: 40.0,
                shield: 0.0,
                evasion: 20.0,
                engine_power: 80.0,
                warp_speed: 3.0,
                maneuverability: 60.0,
                crew_capacity: 50,
                cargo_capacity: 50,
                fuel_capacity: 300.0,
                hull_space: 400,
                power_output: 80.0,
            },
            HullClass::Destroyer => HullStats {
                hit_points: 1000.0,
                armor: 60.0,
                shield: 0.0,
                evasion: 15.0,
                engine_power: 120.0,
                warp_speed: 2.5,
                maneuverability: 50.0,
                crew_capacity: 90,
                cargo_capacity: 80,
                fuel_capacity: 400.0,
                hull_space: 600,
                power_output: 120.0,
            },
            HullClass::Cruiser => HullStats {
                hit_points: 1800.0,
                armor: 100.0,
                shield: 0.0,
                evasion: 10.0,
                engine_power: 180.0,
                warp_speed: 2.0,
                maneuverability: 40.0,
                crew_capacity: 180,
                cargo_capacity: 150,
                fuel_capacity: 600.0,
                hull_space: 900,
                power_output: 200.0,
            },
            HullClass::Battleship => HullStats {
                hit_points: 3500.0,
                armor: 200.0,
                shield: 0.0,
                evasion: 5.0,
                engine_power: 300.0,
                warp_speed: 1.5,
                maneuverability: 20.0,
                crew_capacity: 400,
                cargo_capacity: 200,
                fuel_capacity: 900.0,
                hull_space: 1500,
                power_output: 350.0,
            },
            HullClass::Carrier => HullStats {
                hit_points: 3000.0,
                armor: 150.0,
                shield: 0.0,
                evasion: 5.0,
                engine_power: 280.0,
                warp_speed: 1.5,
                maneuverability: 20.0,
                crew_capacity: 500,
                cargo_capacity: 400,
                fuel_capacity: 1000.0,
                hull_space: 1400,
                power_output: 300.0,
            },
            HullClass::Freighter => HullStats {
                hit_points: 800.0,
                armor: 30.0,
                shield: 0.0,
                evasion: 5.0,
                engine_power: 100.0,
                warp_speed: 2.0,
                maneuverability: 20.0,
                crew_capacity: 30,
                cargo_capacity: 1000,
                fuel_capacity: 800.0,
                hull_space: 700,
                power_output: 60.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigger_hulls_have_more_space() {
        let space: Vec<u32> = [
            HullClass::Corvette,
            HullClass::Frigate,
            HullClass::Destroyer,
            HullClass::Cruiser,
            HullClass::Battleship,
        ]
        .iter()
        .map(|h| h.base_stats().hull_space)
        .collect();
        assert!(space.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_cruiser_has_900_space() {
        assert_eq!(HullClass::Cruiser.base_stats().hull_space, 900);
    }

    #[test]
    fn test_small_hulls_evade_better() {
        assert!(HullClass::Corvette.base_stats().evasion > HullClass::Battleship.base_stats().evasion);
    }
}
