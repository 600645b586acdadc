//! Fleets: faction-owned groups of ships moving and fighting together

use std::sync::Arc;

use serde::Serialize;

use crate::core::config::CombatConfig;
use crate::core::error::DesignError;
use crate::core::types::{FactionId, FleetId, LocationId, ShipId};
use crate::design::ship_design::ShipDesign;
use crate::fleet::mission::{Mission, MissionEvent};
use crate::fleet::stats::FleetStats;
use crate::fleet::supply::{FleetSupply, SupplyShortage};
use crate::services::MapIntel;
use crate::ship::unit::Ship;

/// What happened to a fleet during one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetTurnReport {
    pub ships_lost: Vec<ShipId>,
    pub shortage: SupplyShortage,
    pub events: Vec<MissionEvent>,
}

#[derive(Debug, Clone)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub faction: FactionId,
    location: LocationId,
    ships: Vec<Ship>,
    supply: FleetSupply,
    mission: Mission,
    destination: Option<LocationId>,
    moving: bool,
    /// Ordered to a destination it already holds; arrives on the next turn
    arrival_pending: bool,
    stats: FleetStats,
}

impl Fleet {
    pub fn new(name: impl Into<String>, faction: FactionId, location: LocationId) -> Self {
        Self {
            id: FleetId::new(),
            name: name.into(),
            faction,
            location,
            ships: Vec::new(),
            supply: FleetSupply::default(),
            mission: Mission::Standby,
            destination: None,
            moving: false,
            arrival_pending: false,
            stats: FleetStats::default(),
        }
    }

    pub fn with_supply(mut self, supply: FleetSupply) -> Self {
        self.supply = supply;
        self
    }

    // === MEMBERSHIP ===

    /// Build a ship from a design and add it. Invalid designs are refused.
    pub fn commission(
        &mut self,
        design: &Arc<ShipDesign>,
        name: impl Into<String>,
    ) -> Result<ShipId, DesignError> {
        design.ensure_buildable()?;
        let ship = Ship::new(name, Arc::clone(design), self.faction);
        let id = ship.id;
        self.ships.push(ship);
        self.recompute_stats();
        Ok(id)
    }

    /// Add an existing ship. Destroyed ships and foreign ships are refused.
    pub fn add_ship(&mut self, ship: Ship) -> bool {
        if ship.is_destroyed() || ship.faction != self.faction {
            return false;
        }
        self.ships.push(ship);
        self.recompute_stats();
        true
    }

    pub fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        let idx = self.ships.iter().position(|s| s.id == id)?;
        let ship = self.ships.remove(idx);
        self.recompute_stats();
        Some(ship)
    }

    /// Move a ship into another fleet of the same faction
    pub fn transfer_ship(&mut self, to: &mut Fleet, id: ShipId) -> bool {
        if to.faction != self.faction || to.id == self.id {
            return false;
        }
        if !self.ships.iter().any(|s| s.id == id && !s.is_destroyed()) {
            return false;
        }
        match self.remove_ship(id) {
            Some(ship) => to.add_ship(ship),
            None => false,
        }
    }

    /// Take over every ship and all stores of `other`, leaving it empty
    ///
    /// `other` keeps its store capacities so it can be loaded again.
    pub fn merge(&mut self, other: &mut Fleet) -> usize {
        if other.faction != self.faction || other.id == self.id {
            return 0;
        }
        let moved = other.ships.len();
        self.ships.append(&mut other.ships);
        let emptied = FleetSupply::empty(
            other.supply.max_food,
            other.supply.max_energy,
            other.supply.max_fuel,
        );
        let stores = std::mem::replace(&mut other.supply, emptied);
        self.supply.absorb(stores);
        other.recompute_stats();
        self.recompute_stats();
        moved
    }

    /// Detach the listed ships into a new fleet at the same location
    ///
    /// Stores go with the ships in proportion to head count. Returns `None`
    /// when none of the ids belong to this fleet.
    pub fn split(&mut self, ids: &[ShipId], name: impl Into<String>) -> Option<Fleet> {
        let before = self.ships.len();
        let (leaving, staying): (Vec<Ship>, Vec<Ship>) = std::mem::take(&mut self.ships)
            .into_iter()
            .partition(|s| ids.contains(&s.id));
        self.ships = staying;

        if leaving.is_empty() {
            return None;
        }

        let share = leaving.len() as f32 / before as f32;
        let mut detached = Fleet::new(name, self.faction, self.location)
            .with_supply(self.supply.split_off(share));
        detached.ships = leaving;
        detached.recompute_stats();
        self.recompute_stats();
        Some(detached)
    }

    /// Drop destroyed ships, returning their ids
    pub fn remove_destroyed(&mut self) -> Vec<ShipId> {
        let lost: Vec<ShipId> = self
            .ships
            .iter()
            .filter(|s| s.is_destroyed())
            .map(|s| s.id)
            .collect();
        if !lost.is_empty() {
            self.ships.retain(|s| !s.is_destroyed());
            self.recompute_stats();
        }
        lost
    }

    // === MISSIONS ===

    /// Assign a mission. A destination given here wins over the map's choice.
    ///
    /// Move without a destination falls back to Standby.
    pub fn set_mission(
        &mut self,
        mission: Mission,
        destination: Option<LocationId>,
        intel: &dyn MapIntel,
    ) {
        self.mission = mission;
        self.destination = match mission {
            Mission::Standby => None,
            _ => destination.or_else(|| mission.choose_target(intel, self.location, self.faction)),
        };

        if mission == Mission::Move && self.destination.is_none() {
            tracing::debug!("{} ordered to move without a destination, standing by", self.name);
            self.mission = Mission::Standby;
        }

        self.moving = self.destination.map_or(false, |d| d != self.location);
        self.arrival_pending =
            self.mission != Mission::Standby && self.destination == Some(self.location);
    }

    fn advance_mission(&mut self, intel: &dyn MapIntel, events: &mut Vec<MissionEvent>) {
        if self.mission == Mission::Standby {
            return;
        }

        if self.destination.is_none() {
            self.destination = self.mission.choose_target(intel, self.location, self.faction);
            if let Some(destination) = self.destination {
                self.moving = destination != self.location;
                if self.moving {
                    events.push(MissionEvent::Departed {
                        fleet: self.id,
                        destination,
                    });
                } else {
                    self.arrival_pending = true;
                }
            }
        }

        if self.arrival_pending {
            self.arrival_pending = false;
            self.arrive(intel, events);
            return;
        }

        let destination = match self.destination {
            Some(d) if self.moving => d,
            _ => return,
        };

        match intel.next_step(self.location, destination) {
            Some(next) => {
                self.location = next;
                if next == destination {
                    self.arrive(intel, events);
                }
            }
            None => {
                self.moving = false;
                events.push(MissionEvent::Stranded {
                    fleet: self.id,
                    location: self.location,
                });
            }
        }
    }

    fn arrive(&mut self, intel: &dyn MapIntel, events: &mut Vec<MissionEvent>) {
        self.moving = false;
        events.push(MissionEvent::Arrived {
            fleet: self.id,
            location: self.location,
        });

        if self.mission == Mission::Attack {
            tracing::info!("{} reached its target at {:?}", self.name, self.location);
            events.push(MissionEvent::EngagementRequested {
                fleet: self.id,
                faction: self.faction,
                location: self.location,
            });
        }

        if self.mission.retargets_on_arrival() {
            self.destination = self.mission.choose_target(intel, self.location, self.faction);
            if let Some(destination) = self.destination {
                self.moving = destination != self.location;
                if self.moving {
                    events.push(MissionEvent::Departed {
                        fleet: self.id,
                        destination,
                    });
                }
            }
        }
    }

    // === TURN ===

    /// Per-turn update: ship upkeep, fleet supply, mission, then stats
    pub fn turn(&mut self, intel: &dyn MapIntel, config: &CombatConfig) -> FleetTurnReport {
        let mut report = FleetTurnReport::default();

        for ship in self.ships.iter_mut().filter(|s| !s.is_destroyed()) {
            ship.set_moving(self.moving);
            ship.turn(config);
        }
        report.ships_lost = self.remove_destroyed();

        let food_need: f32 =
            self.ships.iter().map(|s| s.crew() as f32).sum::<f32>() * config.fleet_food_per_crew;
        let energy_need: f32 =
            self.ships.iter().map(Ship::power_draw).sum::<f32>() * config.fleet_energy_per_power;
        let fuel_need: f32 = if self.moving {
            self.ships.iter().map(Ship::fuel_burn_rate).sum()
        } else {
            0.0
        };

        report.shortage = self.supply.consume(food_need, energy_need, fuel_need);
        if report.shortage.food {
            for ship in &mut self.ships {
                ship.apply_morale_penalty(config.fleet_food_shortage_morale_penalty);
            }
        }
        if report.shortage.energy {
            for ship in &mut self.ships {
                ship.apply_readiness_penalty(config.fleet_energy_shortage_readiness_penalty);
            }
        }
        if report.shortage.fuel && self.moving {
            tracing::warn!("{} is out of fuel and has stopped", self.name);
            self.moving = false;
        }

        self.advance_mission(intel, &mut report.events);
        self.recompute_stats();
        report
    }

    /// Refresh the cached aggregates
    pub fn recompute_stats(&mut self) {
        self.stats = FleetStats::from_ships(&self.ships);
    }

    /// Load stores. A stalled fleet with somewhere to go gets moving again.
    pub fn resupply(&mut self, food: f32, energy: f32, fuel: f32) {
        self.supply.add(food, energy, fuel);
        if !self.moving && self.supply.fuel > 0.0 {
            if let Some(destination) = self.destination {
                self.moving = destination != self.location && self.mission != Mission::Standby;
            }
        }
    }

    // === DAMAGE ===

    /// Spread raw damage over the ships in order, each taking up to its hit
    /// points. Returns the damage actually applied.
    pub fn take_distributed_damage(&mut self, amount: f32) -> f32 {
        let mut remaining = amount.max(0.0);
        let mut applied = 0.0;
        for ship in self.ships.iter_mut().filter(|s| !s.is_destroyed()) {
            if remaining <= 0.0 {
                break;
            }
            let absorbed = ship.take_direct_damage(remaining);
            remaining -= absorbed;
            applied += absorbed;
        }
        applied
    }

    // === ACCESSORS ===

    pub fn location(&self) -> LocationId {
        self.location
    }

    /// Teleport, used by scenario setup
    pub fn set_location(&mut self, location: LocationId) {
        self.location = location;
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    pub fn alive_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| !s.is_destroyed())
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_ships().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn has_alive_ships(&self) -> bool {
        self.alive_ships().next().is_some()
    }

    pub fn supply(&self) -> &FleetSupply {
        &self.supply
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    pub fn destination(&self) -> Option<LocationId> {
        self.destination
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn stats(&self) -> &FleetStats {
        &self.stats
    }

    pub fn total_combat_power(&self) -> f32 {
        self.stats.total_combat_power
    }

    pub fn total_health(&self) -> f32 {
        self.alive_ships().map(Ship::hit_points).sum()
    }

    pub fn total_max_health(&self) -> f32 {
        self.alive_ships().map(Ship::max_hit_points).sum()
    }

    pub fn total_armor(&self) -> f32 {
        self.alive_ships().map(Ship::armor).sum()
    }

    pub fn health_percentage(&self) -> f32 {
        let max = self.total_max_health();
        if max <= 0.0 {
            return 0.0;
        }
        self.total_health() / max * 100.0
    }

    /// One-line description for logs and the runner
    pub fn status_summary(&self) -> String {
        let heading = match self.destination {
            Some(d) if self.moving => format!(" -> {:?}", d),
            _ => String::new(),
        };
        format!(
            "{} [{}] {} ships, {:.0}% health, power {:.1}, {}{} at {:?}",
            self.name,
            self.faction,
            self.alive_count(),
            self.health_percentage(),
            self.stats.total_combat_power,
            self.mission.name(),
            heading,
            self.location
        )
    }
}

/// Combined combat power of one faction across a set of fleets
pub fn faction_power(fleets: &[Fleet], faction: FactionId) -> f32 {
    fleets
        .iter()
        .filter(|f| f.faction == faction)
        .map(Fleet::total_combat_power)
        .sum()
}
