//! Map topology abstraction
//!
//! A topology answers three questions for the mission: is a location on the
//! map, are two locations neighbours, and which mine-bearing unit does a
//! vehicle enter when it moves between them. Cell grids and edge graphs
//! answer them differently; everything above this trait is written once.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::edge::EdgeKey;
use super::hex::CellLabel;

/// Which kind of map a scenario describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyKind {
    /// Units are hex cells; vehicles stand on cells
    Hex,
    /// Units are edges; vehicles stand on nodes
    Edges,
}

impl TopologyKind {
    /// Parse the scenario's `topology` field
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hex" | "hexagon" | "cells" => Some(TopologyKind::Hex),
            "edge" | "edges" | "network" => Some(TopologyKind::Edges),
            _ => None,
        }
    }
}

/// Identity of a mine-bearing unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKey {
    Cell(CellLabel),
    Edge(EdgeKey),
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKey::Cell(label) => write!(f, "{}", label),
            UnitKey::Edge(edge) => write!(f, "{}", edge),
        }
    }
}

/// Spatial contract shared by every map kind
pub trait Topology: fmt::Debug + Send {
    fn kind(&self) -> TopologyKind;

    /// Whether a vehicle can stand at `label`
    fn contains_location(&self, label: &str) -> bool;

    /// Irreflexive, symmetric neighbour test. Unknown labels are never adjacent.
    fn is_adjacent(&self, a: &str, b: &str) -> bool;

    /// Unit a vehicle enters moving from `from` to the adjacent `to`
    fn unit_between(&self, from: &str, to: &str) -> Option<UnitKey>;

    /// Unit occupying a location, if locations are units on this map
    fn unit_at(&self, location: &str) -> Option<UnitKey>;

    /// Resolve a user-supplied identity ("B3", "A-B") to a unit
    fn resolve(&self, identity: &str) -> Option<UnitKey>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_kind_parse() {
        assert_eq!(TopologyKind::parse("hex"), Some(TopologyKind::Hex));
        assert_eq!(TopologyKind::parse(" Edges "), Some(TopologyKind::Edges));
        assert_eq!(TopologyKind::parse("grid3d"), None);
    }

    #[test]
    fn test_unit_key_display() {
        let cell = UnitKey::Cell(CellLabel::parse("B3").unwrap());
        assert_eq!(cell.to_string(), "B3");
        let edge = UnitKey::Edge(EdgeKey::new("Y", "X").unwrap());
        assert_eq!(edge.to_string(), "X-Y");
    }
}
