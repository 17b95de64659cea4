//! Edge graph - units are the passages between named nodes

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::topology::{Topology, TopologyKind, UnitKey};

/// Unordered pair of node labels. `A-B` and `B-A` are the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    /// Build a key from two endpoints; `None` for a self-loop or an invalid
    /// node name
    pub fn new(a: &str, b: &str) -> Option<Self> {
        let (a, b) = (a.trim(), b.trim());
        if !Self::is_valid_node(a) || !Self::is_valid_node(b) || a == b {
            return None;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Some(Self {
            low: low.to_string(),
            high: high.to_string(),
        })
    }

    /// A node name must be non-empty and free of the separators `parse`
    /// splits on, so every edge stays addressable as "A-B"
    pub fn is_valid_node(name: &str) -> bool {
        !name.is_empty() && !name.chars().any(|c| c == '-' || c == ',' || c.is_whitespace())
    }

    /// Parse "A-B", "A,B" or "A B"
    pub fn parse(identity: &str) -> Option<Self> {
        let parts: Vec<&str> = identity
            .split(|c: char| c == '-' || c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [a, b] => Self::new(a, b),
            _ => None,
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Nodes and the edges connecting them
#[derive(Debug, Clone, Default)]
pub struct EdgeGraph {
    edges: AHashSet<EdgeKey>,
    nodes: AHashSet<String>,
}

impl EdgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge. Returns false if the pair was already present.
    pub fn insert(&mut self, edge: EdgeKey) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        let (a, b) = edge.endpoints();
        self.nodes.insert(a.to_string());
        self.nodes.insert(b.to_string());
        self.edges.insert(edge);
        true
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Topology for EdgeGraph {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Edges
    }

    fn contains_location(&self, label: &str) -> bool {
        self.nodes.contains(label)
    }

    fn is_adjacent(&self, a: &str, b: &str) -> bool {
        EdgeKey::new(a, b).is_some_and(|key| self.edges.contains(&key))
    }

    fn unit_between(&self, from: &str, to: &str) -> Option<UnitKey> {
        EdgeKey::new(from, to)
            .filter(|key| self.edges.contains(key))
            .map(UnitKey::Edge)
    }

    fn unit_at(&self, _location: &str) -> Option<UnitKey> {
        // Vehicles stand on nodes, which carry no mines
        None
    }

    fn resolve(&self, identity: &str) -> Option<UnitKey> {
        EdgeKey::parse(identity)
            .filter(|key| self.edges.contains(key))
            .map(UnitKey::Edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> EdgeGraph {
        let mut graph = EdgeGraph::new();
        for (a, b) in [("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")] {
            assert!(graph.insert(EdgeKey::new(a, b).unwrap()));
        }
        graph
    }

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new("A", "B"), EdgeKey::new("B", "A"));
        assert_eq!(EdgeKey::new("A", "A"), None);
        assert_eq!(EdgeKey::new("", "A"), None);
        assert_eq!(EdgeKey::new(" A ", "B"), EdgeKey::new("A", "B"));
    }

    #[test]
    fn test_node_names_exclude_separators() {
        for bad in ["N-1", "N,1", "N 1", ""] {
            assert!(!EdgeKey::is_valid_node(bad), "{:?}", bad);
            assert_eq!(EdgeKey::new(bad, "B"), None);
        }
        assert!(EdgeKey::is_valid_node("N_1"));
        let key = EdgeKey::new("N_1", "B").unwrap();
        assert_eq!(EdgeKey::parse(&key.to_string()), Some(key));
    }

    #[test]
    fn test_edge_key_parse() {
        assert_eq!(EdgeKey::parse("A-B"), EdgeKey::new("A", "B"));
        assert_eq!(EdgeKey::parse("B, A"), EdgeKey::new("A", "B"));
        assert_eq!(EdgeKey::parse("A B"), EdgeKey::new("A", "B"));
        assert_eq!(EdgeKey::parse("A"), None);
        assert_eq!(EdgeKey::parse("A-B-C"), None);
    }

    #[test]
    fn test_duplicate_edges_rejected() {
        let mut graph = triangle_with_tail();
        assert!(!graph.insert(EdgeKey::new("B", "A").unwrap()));
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_adjacency_requires_direct_edge() {
        let graph = triangle_with_tail();
        assert!(graph.is_adjacent("A", "B"));
        assert!(graph.is_adjacent("D", "C"));
        assert!(!graph.is_adjacent("A", "D"));
        assert!(!graph.is_adjacent("A", "A"));
        assert!(!graph.is_adjacent("A", "Q"));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = triangle_with_tail();
        let nodes = ["A", "B", "C", "D", "Q"];
        for a in nodes {
            for b in nodes {
                assert_eq!(graph.is_adjacent(a, b), graph.is_adjacent(b, a));
            }
        }
    }

    #[test]
    fn test_unit_between_and_resolve() {
        let graph = triangle_with_tail();
        let key = graph.unit_between("D", "C").unwrap();
        assert_eq!(key.to_string(), "C-D");
        assert_eq!(graph.resolve("c-d"), None);
        assert_eq!(graph.resolve("D-C"), Some(key));
        assert!(graph.unit_at("A").is_none());
    }
}
