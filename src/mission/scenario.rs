//! Load mission scenarios from JSON
//!
//! Two document shapes are accepted:
//! - a cell map: every top-level key other than `mission` is a cell label
//! - an edge list: a top-level `edges` array of passage records
//!
//! Either way the `mission` section supplies start, end and the cost table.
//! Anything malformed fails the whole load; no partial scenario is returned.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::config::MissionCosts;
use crate::core::error::{MinefieldError, Result};
use crate::core::types::{Cost, ScoutId, SensorSource};
use crate::map::{
    CellLabel, EdgeGraph, EdgeKey, HexGrid, MapUnit, Minefield, TopologyKind, UnitKey,
};

/// A single value or one value per scout
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Mine marker: spreadsheets export 0/1, hand-written files use booleans
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum MineFlag {
    Flag(bool),
    Number(u64),
}

impl MineFlag {
    fn present(self, unit: &str) -> Result<bool> {
        match self {
            MineFlag::Flag(present) => Ok(present),
            MineFlag::Number(0) => Ok(false),
            MineFlag::Number(1) => Ok(true),
            MineFlag::Number(n) => Err(MinefieldError::InvalidScenario(format!(
                "unit {} has mine marker {}, expected 0 or 1",
                unit, n
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MissionSection {
    start: String,
    end: String,
    #[serde(rename = "human estimate time")]
    human_estimate_time: Cost,
    #[serde(rename = "AI estimate time")]
    ai_estimate_time: Cost,
    #[serde(rename = "UGV traversal time")]
    ugv_traversal_time: Cost,
    #[serde(rename = "UGV clear time")]
    ugv_clear_time: Cost,
    #[serde(rename = "UAV traversal time")]
    uav_traversal_time: OneOrMany<Cost>,
    #[serde(default)]
    topology: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CellRecord {
    #[serde(rename = "Terrain")]
    terrain: String,
    #[serde(rename = "AI Confidence", default)]
    ai_confidence: Option<OneOrMany<f64>>,
    #[serde(rename = "AI 1 Confidence", default)]
    ai_1_confidence: Option<f64>,
    #[serde(rename = "AI 2 Confidence", default)]
    ai_2_confidence: Option<f64>,
    #[serde(rename = "Human Confidence")]
    human_confidence: f64,
    #[serde(rename = "Mine")]
    mine: MineFlag,
}

impl CellRecord {
    /// AI readings in scout order. The combined and numbered key forms are
    /// exclusive.
    fn ai_estimates(&mut self, label: &str) -> Result<Vec<f64>> {
        let numbered = [self.ai_1_confidence, self.ai_2_confidence];

        match self.ai_confidence.take() {
            Some(_) if numbered.iter().any(Option::is_some) => {
                Err(MinefieldError::InvalidScenario(format!(
                    "cell {} gives both 'AI Confidence' and numbered AI confidences",
                    label
                )))
            }
            Some(values) => Ok(values.into_vec()),
            None => Ok(numbered.into_iter().map_while(|v| v).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    landmine_present: MineFlag,
    ai_estimate: OneOrMany<f64>,
    human_estimate: f64,
    terrain_type: String,
}

/// A fully validated scenario, ready to become a mission
#[derive(Debug)]
pub struct Scenario {
    pub field: Minefield,
    pub costs: MissionCosts,
    pub start: String,
    pub end: String,
}

impl Scenario {
    /// Parse and validate a scenario document
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(mut root) = value else {
            return Err(MinefieldError::InvalidScenario(
                "top level must be a JSON object".into(),
            ));
        };

        let mission_value = root
            .remove("mission")
            .ok_or_else(|| MinefieldError::MissingSection("mission".into()))?;
        let mission: MissionSection = serde_json::from_value(mission_value)?;

        let costs = MissionCosts {
            ai_estimate: mission.ai_estimate_time,
            human_estimate: mission.human_estimate_time,
            ugv_traversal: mission.ugv_traversal_time,
            ugv_clear: mission.ugv_clear_time,
            uav_traversal: mission.uav_traversal_time.into_vec(),
        };
        costs.validate().map_err(MinefieldError::InvalidCosts)?;

        let kind = match &mission.topology {
            Some(name) => TopologyKind::parse(name)
                .ok_or_else(|| MinefieldError::UnknownTopology(name.clone()))?,
            None if root.contains_key("edges") => TopologyKind::Edges,
            None => TopologyKind::Hex,
        };

        let scouts = costs.scout_count();
        let field = match kind {
            TopologyKind::Hex => build_cells(root, scouts)?,
            TopologyKind::Edges => build_edges(root, scouts)?,
        };

        if field.is_empty() {
            return Err(MinefieldError::InvalidScenario("map has no units".into()));
        }

        for (role, label) in [("Start", &mission.start), ("End", &mission.end)] {
            if !field.contains_location(label) {
                return Err(MinefieldError::UnknownLocation {
                    role,
                    label: label.clone(),
                });
            }
        }

        tracing::debug!(
            "Loaded {:?} scenario: {} units, {} scouts, {} -> {}",
            kind,
            field.len(),
            scouts,
            mission.start,
            mission.end
        );

        Ok(Self {
            field,
            costs,
            start: mission.start,
            end: mission.end,
        })
    }

    /// Load a scenario file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn with_sensors(
    mut unit: MapUnit,
    ai: Vec<f64>,
    human: f64,
    scouts: usize,
) -> Result<MapUnit> {
    if ai.len() != scouts {
        return Err(MinefieldError::SensorMismatch {
            unit: unit.key.to_string(),
            expected: scouts,
            found: ai.len(),
        });
    }
    for (i, confidence) in ai.into_iter().enumerate() {
        unit = unit.with_confidence(SensorSource::Ai(ScoutId::from_index(i)), confidence);
    }
    Ok(unit.with_confidence(SensorSource::Human, human))
}

fn build_cells(root: Map<String, Value>, scouts: usize) -> Result<Minefield> {
    let mut grid = HexGrid::new();
    let mut units = Vec::with_capacity(root.len());

    for (label, value) in root {
        let cell = CellLabel::parse(&label).ok_or_else(|| MinefieldError::InvalidLabel(label.clone()))?;
        if let Some(existing) = grid.insert(cell.clone()) {
            return Err(MinefieldError::DuplicateUnit(format!(
                "{} occupies the same cell as {}",
                label, existing
            )));
        }

        let mut record: CellRecord = serde_json::from_value(value)?;
        let ai = record.ai_estimates(&label)?;
        let mine_present = record.mine.present(&label)?;
        let unit = MapUnit::new(UnitKey::Cell(cell), record.terrain, mine_present);
        units.push(with_sensors(unit, ai, record.human_confidence, scouts)?);
    }

    Minefield::new(Box::new(grid), units)
}

fn build_edges(mut root: Map<String, Value>, scouts: usize) -> Result<Minefield> {
    let edges_value = root
        .remove("edges")
        .ok_or_else(|| MinefieldError::MissingSection("edges".into()))?;
    for key in root.keys() {
        tracing::warn!("Ignoring unexpected scenario key {:?} in edge map", key);
    }

    let records: Vec<EdgeRecord> = serde_json::from_value(edges_value)?;
    let mut graph = EdgeGraph::new();
    let mut units = Vec::with_capacity(records.len());

    for record in records {
        for node in [&record.from, &record.to] {
            if !EdgeKey::is_valid_node(node.trim()) {
                return Err(MinefieldError::InvalidScenario(format!(
                    "node name {:?} must be non-empty with no '-', ',' or whitespace",
                    node
                )));
            }
        }
        let key = EdgeKey::new(&record.from, &record.to).ok_or_else(|| {
            MinefieldError::InvalidScenario(format!(
                "edge {:?} -> {:?} does not join two distinct nodes",
                record.from, record.to
            ))
        })?;
        if !graph.insert(key.clone()) {
            return Err(MinefieldError::DuplicateUnit(key.to_string()));
        }

        let mine_present = record.landmine_present.present(&key.to_string())?;
        let unit = MapUnit::new(UnitKey::Edge(key), record.terrain_type, mine_present);
        units.push(with_sensors(
            unit,
            record.ai_estimate.into_vec(),
            record.human_estimate,
            scouts,
        )?);
    }

    tracing::debug!(
        "Edge map: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Minefield::new(Box::new(graph), units)
}
