//! Mission controller - the command surface over one minefield
//!
//! Commands run to completion one at a time. Each one either mutates state
//! and charges exactly one fixed cost, or is rejected and changes nothing.
//! Either way it overwrites the current log line. The selected unit is the
//! only state carried from one command to the next.

use serde::Serialize;
use std::path::Path;

use super::log::LogSink;
use super::outcome::{GroundOutcome, Rejection};
use super::scenario::Scenario;
use super::sensors;
use super::vehicles::{plan_step, Fleet, Scout};
use crate::core::config::MissionCosts;
use crate::core::error::Result;
use crate::core::types::{Cost, ScoutId, SensorSource, VehicleId};
use crate::map::{Contact, MapUnit, MineState, Minefield, TopologyKind};

/// Log line emitted when the ground vehicle reaches the end location
pub const MISSION_SUCCESS: &str = "MISSION SUCCESS";

/// One running mission
pub struct Mission {
    field: Minefield,
    fleet: Fleet,
    costs: MissionCosts,
    start: String,
    end: String,
    selected: Option<usize>,
    total: Cost,
    current_log: String,
    sink: Box<dyn LogSink>,
}

/// Serializable view of a mission for drivers
#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    pub topology: TopologyKind,
    pub start: String,
    pub end: String,
    pub ugv_location: String,
    pub uav_locations: Vec<(ScoutId, String)>,
    pub selected_unit: Option<String>,
    pub total: Cost,
    pub log: String,
    pub complete: bool,
}

impl Mission {
    /// Start a mission from a validated scenario. All vehicles begin at the
    /// start location; a start cell is made safe and counts as scanned.
    pub fn new(scenario: Scenario, sink: Box<dyn LogSink>) -> Self {
        let Scenario {
            mut field,
            costs,
            start,
            end,
        } = scenario;

        let fleet = Fleet::at_start(&start, &costs);

        if let Some(index) = field.unit_at(&start) {
            let unit = field.unit_mut(index);
            if unit.blocks() {
                tracing::warn!("Start unit {} listed a mine; treating it as clear", unit.key);
            }
            unit.make_safe();
            for scout in fleet.scout_ids() {
                unit.mark_scanned(scout);
            }
        }

        tracing::info!(
            "Mission ready: {} units, {} scouts, {} -> {}",
            field.len(),
            fleet.scouts().len(),
            start,
            end
        );

        Self {
            field,
            fleet,
            costs,
            start,
            end,
            selected: None,
            total: 0,
            current_log: String::new(),
            sink,
        }
    }

    /// Parse a scenario document and start a mission from it
    pub fn from_json(json: &str, sink: Box<dyn LogSink>) -> Result<Self> {
        Ok(Self::new(Scenario::from_json(json)?, sink))
    }

    /// Load a scenario file and start a mission from it
    pub fn from_file(path: &Path, sink: Box<dyn LogSink>) -> Result<Self> {
        Ok(Self::new(Scenario::from_file(path)?, sink))
    }

    // ===== COMMANDS =====

    /// Select a unit by cell label or edge endpoints
    pub fn select(&mut self, identity: &str) -> Option<&MapUnit> {
        let identity = identity.trim();
        match self.field.resolve(identity) {
            Some(index) => {
                self.selected = Some(index);
                let message = format!("Selected {}.", self.field.unit(index).key);
                self.log(&message);
                Some(self.field.unit(index))
            }
            None => {
                self.reject(Rejection::UnitNotFound(identity.to_string()));
                None
            }
        }
    }

    /// Fly a scout one step. The unit it enters becomes scanned and selected.
    pub fn move_scout(&mut self, scout: ScoutId, destination: &str) -> Option<&MapUnit> {
        match self.try_move_scout(scout, destination.trim()) {
            Ok(index) => Some(self.field.unit(index)),
            Err(rejection) => {
                self.reject(rejection);
                None
            }
        }
    }

    fn try_move_scout(&mut self, id: ScoutId, destination: &str) -> std::result::Result<usize, Rejection> {
        let Scout {
            location,
            traversal_cost,
            ..
        } = self.fleet.scout(id).cloned().ok_or(Rejection::UnknownScout(id))?;

        let index = plan_step(&self.field, VehicleId::Scout(id), &location, destination)?;

        self.charge(traversal_cost)?;
        if let Some(scout) = self.fleet.scout_mut(id) {
            scout.location = destination.to_string();
        }
        let unit = self.field.unit_mut(index);
        unit.mark_scanned(id);
        let key = unit.key.to_string();
        self.selected = Some(index);

        let message = format!(
            "{} moved to {}. Estimates can now be obtained for {}.",
            id, destination, key
        );
        self.log(&message);
        Ok(index)
    }

    /// Drive the ground vehicle one step, running the mine life-cycle
    pub fn move_ground(&mut self, destination: &str) -> GroundOutcome {
        let destination = destination.trim();
        let from = self.fleet.ground.location.clone();
        let index = match plan_step(&self.field, VehicleId::Ground, &from, destination) {
            Ok(index) => index,
            Err(rejection) => {
                self.reject(rejection);
                return GroundOutcome::Rejected;
            }
        };

        let cost = match self.field.unit(index).state() {
            MineState::Found => self.fleet.ground.clear_cost,
            _ => self.fleet.ground.traversal_cost,
        };
        if let Err(rejection) = self.charge(cost) {
            self.reject(rejection);
            return GroundOutcome::Rejected;
        }

        let unit = self.field.unit_mut(index);
        let contact = unit.ground_contact();
        let key = unit.key.to_string();

        let outcome = match contact {
            Contact::Detected => {
                let message = format!(
                    "Landmine detected in {}. UGV held at {}. Move again to clear it.",
                    key, from
                );
                self.log(&message);
                GroundOutcome::MineFound
            }
            Contact::Cleared => {
                self.fleet.ground.location = destination.to_string();
                let message = format!("Landmine cleared in {}. UGV moved to {}.", key, destination);
                self.log(&message);
                GroundOutcome::MineCleared
            }
            Contact::Passable => {
                self.fleet.ground.location = destination.to_string();
                let message = format!("UGV moved to {}.", destination);
                self.log(&message);
                GroundOutcome::Moved
            }
        };

        if outcome.advanced() && destination == self.end {
            self.log(MISSION_SUCCESS);
        }

        outcome
    }

    /// Buy an AI estimate for the selected unit. Defaults to the first scout.
    pub fn query_ai(&mut self, scout: Option<ScoutId>) -> bool {
        let scout = scout.unwrap_or_else(|| self.lead_scout());
        if self.fleet.scout(scout).is_none() {
            self.reject(Rejection::UnknownScout(scout));
            return false;
        }
        self.query(SensorSource::Ai(scout))
    }

    /// Buy the human expert's estimate for the selected unit
    pub fn query_human(&mut self) -> bool {
        self.query(SensorSource::Human)
    }

    fn query(&mut self, source: SensorSource) -> bool {
        let Some(index) = self.selected else {
            self.reject(Rejection::NoSelection);
            return false;
        };

        let cost = sensors::source_cost(source, &self.costs);
        let gate = sensors::check_query(self.field.unit(index), source)
            .and_then(|()| self.charge(cost));
        if let Err(rejection) = gate {
            self.reject(rejection);
            return false;
        }

        let unit = self.field.unit_mut(index);
        match sensors::query(unit, source, &self.costs) {
            Ok(estimate) => {
                let key = unit.key.to_string();
                let message = format!(
                    "{} queried for {}. The estimate was {}.",
                    source, key, estimate.confidence
                );
                self.log(&message);
                true
            }
            Err(rejection) => {
                self.reject(rejection);
                false
            }
        }
    }

    // ===== ACCESSORS =====

    pub fn total(&self) -> Cost {
        self.total
    }

    pub fn current_log(&self) -> &str {
        &self.current_log
    }

    pub fn ugv_location(&self) -> &str {
        &self.fleet.ground.location
    }

    pub fn uav_location(&self, scout: ScoutId) -> Option<&str> {
        self.fleet.scout(scout).map(|s| s.location.as_str())
    }

    pub fn scouts(&self) -> &[Scout] {
        self.fleet.scouts()
    }

    /// Scout addressed when a command names none
    pub fn lead_scout(&self) -> ScoutId {
        self.fleet.lead_scout()
    }

    pub fn selected_unit(&self) -> Option<&MapUnit> {
        self.selected.map(|i| self.field.unit(i))
    }

    pub fn costs(&self) -> &MissionCosts {
        &self.costs
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn field(&self) -> &Minefield {
        &self.field
    }

    /// The ground vehicle stands at the end location. It can only get there
    /// through a unit with no blocking mine.
    pub fn is_complete(&self) -> bool {
        self.fleet.ground.location == self.end
    }

    /// Start/end line shown alongside the cost summary
    pub fn details(&self) -> String {
        format!(
            "Mission Details: Start - {}, End - {}, {}",
            self.start,
            self.end,
            self.costs.summary()
        )
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            topology: self.field.kind(),
            start: self.start.clone(),
            end: self.end.clone(),
            ugv_location: self.fleet.ground.location.clone(),
            uav_locations: self
                .fleet
                .scouts()
                .iter()
                .map(|s| (s.id, s.location.clone()))
                .collect(),
            selected_unit: self.selected_unit().map(|u| u.key.to_string()),
            total: self.total,
            log: self.current_log.clone(),
            complete: self.is_complete(),
        }
    }

    // ===== INTERNALS =====

    /// Add a command's cost to the total. Called before any other mutation.
    fn charge(&mut self, cost: Cost) -> std::result::Result<(), Rejection> {
        self.total = self
            .total
            .checked_add(cost)
            .ok_or(Rejection::TotalOverflow {
                total: self.total,
                cost,
            })?;
        Ok(())
    }

    fn log(&mut self, message: &str) {
        tracing::info!(total = self.total, "{}", message);
        self.current_log = message.to_string();
        self.sink.append(message);
    }

    fn reject(&mut self, rejection: Rejection) {
        let message = rejection.to_string();
        tracing::debug!(?rejection, "Command rejected");
        self.current_log = message.clone();
        self.sink.append(&message);
    }
}

impl std::fmt::Debug for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mission")
            .field("topology", &self.field.kind())
            .field("units", &self.field.len())
            .field("fleet", &self.fleet)
            .field("selected", &self.selected)
            .field("total", &self.total)
            .field("current_log", &self.current_log)
            .finish()
    }
}
