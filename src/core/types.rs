//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mission time unit. Every charge against the mission total is one of these.
pub type Cost = u64;

/// Identifier for an aerial scout (1-based, matching "UAV 1", "UAV 2")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoutId(pub u8);

impl ScoutId {
    /// Scout id for a zero-based position in the fleet
    pub fn from_index(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    /// Zero-based position in the fleet
    pub fn index(&self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for ScoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UAV {}", self.0)
    }
}

/// An estimate provider that can be queried once per unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorSource {
    /// Automated model attached to a specific scout's imagery
    Ai(ScoutId),
    /// Human expert reviewing whatever imagery exists
    Human,
}

impl fmt::Display for SensorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorSource::Ai(scout) => write!(f, "AI {}", scout.0),
            SensorSource::Human => write!(f, "Human"),
        }
    }
}

/// Which vehicle a movement command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleId {
    Ground,
    Scout(ScoutId),
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleId::Ground => write!(f, "UGV"),
            VehicleId::Scout(id) => write!(f, "{}", id),
        }
    }
}
