//! Minefield map - topology plus the mine-bearing units laid over it
//!
//! Two map kinds are supported:
//! - hex cells, where vehicles stand on the units themselves
//! - edge graphs, where vehicles stand on nodes and the edges carry mines

pub mod edge;
pub mod hex;
pub mod topology;
pub mod unit;

pub use edge::{EdgeGraph, EdgeKey};
pub use hex::{CellLabel, HexCoord, HexGrid};
pub use topology::{Topology, TopologyKind, UnitKey};
pub use unit::{Contact, MapUnit, MineState};

use ahash::AHashMap;

use crate::core::error::{MinefieldError, Result};

/// Units of one scenario, indexed by key, over their topology
#[derive(Debug)]
pub struct Minefield {
    topology: Box<dyn Topology>,
    units: Vec<MapUnit>,
    index: AHashMap<UnitKey, usize>,
}

impl Minefield {
    /// Build from a topology and its units. Keys must be unique.
    pub fn new(topology: Box<dyn Topology>, units: Vec<MapUnit>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            if index.insert(unit.key.clone(), i).is_some() {
                return Err(MinefieldError::DuplicateUnit(unit.key.to_string()));
            }
        }
        Ok(Self {
            topology,
            units,
            index,
        })
    }

    pub fn kind(&self) -> TopologyKind {
        self.topology.kind()
    }

    pub fn units(&self) -> &[MapUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn index_of(&self, key: &UnitKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn unit(&self, index: usize) -> &MapUnit {
        &self.units[index]
    }

    pub(crate) fn unit_mut(&mut self, index: usize) -> &mut MapUnit {
        &mut self.units[index]
    }

    pub fn contains_location(&self, label: &str) -> bool {
        self.topology.contains_location(label)
    }

    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.topology.is_adjacent(a, b)
    }

    /// Index of the unit entered moving between two adjacent locations
    pub fn unit_between(&self, from: &str, to: &str) -> Option<usize> {
        let key = self.topology.unit_between(from, to)?;
        self.index_of(&key)
    }

    /// Index of the unit a vehicle stands on, for maps where that exists
    pub fn unit_at(&self, location: &str) -> Option<usize> {
        let key = self.topology.unit_at(location)?;
        self.index_of(&key)
    }

    /// Index of the unit named by a user-supplied identity
    pub fn resolve(&self, identity: &str) -> Option<usize> {
        let key = self.topology.resolve(identity)?;
        self.index_of(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cell_field() -> Minefield {
        let mut grid = HexGrid::new();
        let mut units = Vec::new();
        for (label, mined) in [("A1", false), ("A2", true)] {
            let cell = CellLabel::parse(label).unwrap();
            grid.insert(cell.clone());
            units.push(MapUnit::new(UnitKey::Cell(cell), "Sand", mined));
        }
        Minefield::new(Box::new(grid), units).unwrap()
    }

    #[test]
    fn test_lookup_by_key_and_identity() {
        let field = two_cell_field();
        assert_eq!(field.len(), 2);
        let a2 = field.resolve("A2").unwrap();
        assert!(field.unit(a2).blocks());
        assert_eq!(field.unit_between("A1", "A2"), Some(a2));
        assert_eq!(field.unit_at("A2"), Some(a2));
        assert!(field.resolve("A9").is_none());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let key = UnitKey::Edge(EdgeKey::new("A", "B").unwrap());
        let units = vec![
            MapUnit::new(key.clone(), "Road", false),
            MapUnit::new(key, "Road", true),
        ];
        let err = Minefield::new(Box::new(EdgeGraph::new()), units).unwrap_err();
        assert!(matches!(err, MinefieldError::DuplicateUnit(_)));
    }
}
