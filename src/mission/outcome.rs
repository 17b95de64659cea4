//! Command outcomes and rejection reasons
//!
//! A rejected command is not an error: nothing changes, nothing is charged,
//! and the reason becomes the mission's log line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{Cost, ScoutId, SensorSource, VehicleId};

/// Result of a ground-vehicle move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundOutcome {
    /// Hidden mine detected; vehicle held at its prior location
    MineFound,
    /// Found mine cleared; vehicle advanced
    MineCleared,
    /// Vehicle advanced over clear ground
    Moved,
    /// Move refused; nothing changed
    Rejected,
}

impl GroundOutcome {
    /// Whether the vehicle now stands at the destination
    pub fn advanced(&self) -> bool {
        matches!(self, GroundOutcome::MineCleared | GroundOutcome::Moved)
    }
}

/// Why a command was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NoSelection,
    UnknownScout(ScoutId),
    NotScanned {
        unit: String,
        source: SensorSource,
    },
    AlreadyQueried {
        unit: String,
        source: SensorSource,
    },
    UnitNotFound(String),
    SameLocation {
        vehicle: VehicleId,
        location: String,
    },
    UnknownLocation {
        vehicle: VehicleId,
        location: String,
    },
    NotAdjacent {
        vehicle: VehicleId,
        from: String,
        to: String,
    },
    TotalOverflow {
        total: Cost,
        cost: Cost,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoSelection => {
                write!(f, "No unit selected. Select a unit before requesting an estimate.")
            }
            Rejection::UnknownScout(id) => write!(f, "{} is not part of this mission.", id),
            Rejection::NotScanned { unit, source } => match source {
                SensorSource::Ai(scout) => write!(
                    f,
                    "{} estimate unavailable for {}: {} has not scanned it yet.",
                    source, unit, scout
                ),
                SensorSource::Human => write!(
                    f,
                    "Human estimate unavailable for {}: no UAV has scanned it yet.",
                    unit
                ),
            },
            Rejection::AlreadyQueried { unit, source } => {
                write!(f, "{} estimate for {} was already obtained.", source, unit)
            }
            Rejection::UnitNotFound(identity) => write!(f, "Unit {} could not be found.", identity),
            Rejection::SameLocation { vehicle, location } => {
                write!(f, "{} is already at {}.", vehicle, location)
            }
            Rejection::UnknownLocation { vehicle, location } => write!(
                f,
                "{} could not move to {}: no such location on the map.",
                vehicle, location
            ),
            Rejection::NotAdjacent { vehicle, from, to } => write!(
                f,
                "{} could not move to {}: it is not adjacent to {}.",
                vehicle, to, from
            ),
            Rejection::TotalOverflow { total, cost } => write!(
                f,
                "Mission total {} cannot take a further charge of {}. Command refused.",
                total, cost
            ),
        }
    }
}
