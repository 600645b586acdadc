//! Fleet missions and the events they raise
//!
//! Transitions are always external (`Fleet::set_mission`). Each turn the
//! mission only decides where to go next and what happens on arrival.

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, FleetId, LocationId};
use crate::services::MapIntel;

/// What a fleet is currently doing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mission {
    #[default]
    Standby,
    Patrol,
    Explore,
    Defend,
    Attack,
    Retreat,
    /// Travel to an explicit destination
    Move,
}

impl Mission {
    pub fn name(&self) -> &'static str {
        match self {
            Mission::Standby => "Standby",
            Mission::Patrol => "Patrol",
            Mission::Explore => "Explore",
            Mission::Defend => "Defend",
            Mission::Attack => "Attack",
            Mission::Retreat => "Retreat",
            Mission::Move => "Move",
        }
    }

    /// Ask the map for a destination. Standby and Move never pick their own.
    pub fn choose_target(
        &self,
        intel: &dyn MapIntel,
        from: LocationId,
        faction: FactionId,
    ) -> Option<LocationId> {
        match self {
            Mission::Standby | Mission::Move => None,
            Mission::Patrol => intel.patrol_target(from, faction),
            Mission::Explore => intel.exploration_target(from, faction),
            Mission::Defend => intel.defense_target(from, faction),
            Mission::Attack => intel.attack_target(from, faction),
            Mission::Retreat => intel.retreat_target(from, faction),
        }
    }

    /// Patrols pick a fresh waypoint on arrival; everything else holds
    pub fn retargets_on_arrival(&self) -> bool {
        matches!(self, Mission::Patrol)
    }
}

/// Things a fleet reports to the scheduler while following its mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionEvent {
    Departed {
        fleet: FleetId,
        destination: LocationId,
    },
    Arrived {
        fleet: FleetId,
        location: LocationId,
    },
    /// An attacking fleet reached its target; the scheduler should resolve combat
    EngagementRequested {
        fleet: FleetId,
        faction: FactionId,
        location: LocationId,
    },
    /// No route to the destination; the fleet stopped
    Stranded {
        fleet: FleetId,
        location: LocationId,
    },
}
