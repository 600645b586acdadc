//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub Uuid);

impl ShipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShipId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for fleets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FleetId(pub Uuid);

impl FleetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FleetId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque faction identity, supplied by the faction registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "faction-{}", self.0)
    }
}

/// Opaque location handle owned by the map/grid service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u32);

/// Game turn counter (simulation time unit)
pub type Turn = u64;

/// Resources a design costs to build and maintain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Metal,
    Energy,
    Crystal,
    Credits,
}

impl ResourceKind {
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Metal,
            ResourceKind::Energy,
            ResourceKind::Crystal,
            ResourceKind::Credits,
        ]
    }
}
