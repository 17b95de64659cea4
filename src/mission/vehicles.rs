//! Mission vehicles - one ground clearance vehicle and one or more aerial scouts
//!
//! Vehicles only ever take single steps between adjacent locations. Scouts
//! fly over mines; the ground vehicle is held back by them.

use serde::{Deserialize, Serialize};

use super::outcome::Rejection;
use crate::core::config::MissionCosts;
use crate::core::types::{Cost, ScoutId, VehicleId};
use crate::map::Minefield;

/// The ground clearance vehicle (UGV)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundVehicle {
    pub location: String,
    pub traversal_cost: Cost,
    pub clear_cost: Cost,
}

/// An aerial scout (UAV)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scout {
    pub id: ScoutId,
    pub location: String,
    pub traversal_cost: Cost,
}

/// All vehicles of a mission, created together at the start location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub ground: GroundVehicle,
    scouts: Vec<Scout>,
}

impl Fleet {
    /// One ground vehicle plus one scout per configured UAV traversal time
    pub fn at_start(start: &str, costs: &MissionCosts) -> Self {
        let scouts = (0..costs.scout_count())
            .map(ScoutId::from_index)
            .filter_map(|id| {
                costs.uav_traversal_for(id).map(|traversal_cost| Scout {
                    id,
                    location: start.to_string(),
                    traversal_cost,
                })
            })
            .collect();

        Self {
            ground: GroundVehicle {
                location: start.to_string(),
                traversal_cost: costs.ugv_traversal,
                clear_cost: costs.ugv_clear,
            },
            scouts,
        }
    }

    pub fn scouts(&self) -> &[Scout] {
        &self.scouts
    }

    pub fn scout_ids(&self) -> impl Iterator<Item = ScoutId> + '_ {
        self.scouts.iter().map(|s| s.id)
    }

    pub fn scout(&self, id: ScoutId) -> Option<&Scout> {
        self.scouts.iter().find(|s| s.id == id)
    }

    pub fn scout_mut(&mut self, id: ScoutId) -> Option<&mut Scout> {
        self.scouts.iter_mut().find(|s| s.id == id)
    }

    /// First scout; every fleet has one
    pub fn lead_scout(&self) -> ScoutId {
        self.scouts.first().map(|s| s.id).unwrap_or(ScoutId(1))
    }
}

/// Validate a single step and return the index of the unit it enters
pub fn plan_step(
    field: &Minefield,
    vehicle: VehicleId,
    from: &str,
    to: &str,
) -> Result<usize, Rejection> {
    if from == to {
        return Err(Rejection::SameLocation {
            vehicle,
            location: to.to_string(),
        });
    }

    if !field.contains_location(to) {
        return Err(Rejection::UnknownLocation {
            vehicle,
            location: to.to_string(),
        });
    }

    if !field.is_adjacent(from, to) {
        return Err(Rejection::NotAdjacent {
            vehicle,
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    field
        .unit_between(from, to)
        .ok_or_else(|| Rejection::UnitNotFound(to.to_string()))
}
