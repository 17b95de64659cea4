//! Hex cell grid (offset coordinates)
//!
//! Cells are named by two characters: a row letter followed by a column
//! letter or digit. Columns are offset every other index, so the diagonal
//! neighbours of a cell depend on its column parity.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::topology::{Topology, TopologyKind, UnitKey};

/// Offset hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub row: i32,
    pub col: i32,
}

impl HexCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Get all 6 neighbouring coordinates (some may fall off the grid)
    pub fn neighbors(&self) -> [HexCoord; 6] {
        let diagonal_row = if self.col % 2 == 0 {
            self.row - 1
        } else {
            self.row + 1
        };
        [
            HexCoord::new(self.row - 1, self.col),
            HexCoord::new(self.row + 1, self.col),
            HexCoord::new(self.row, self.col - 1),
            HexCoord::new(self.row, self.col + 1),
            HexCoord::new(diagonal_row, self.col - 1),
            HexCoord::new(diagonal_row, self.col + 1),
        ]
    }

    /// Whether two coordinates share a hex side
    pub fn is_adjacent(&self, other: &HexCoord) -> bool {
        self != other && self.neighbors().contains(other)
    }
}

fn letter_index(c: char) -> Option<i32> {
    match c {
        'A'..='J' => Some(c as i32 - 'A' as i32),
        _ => None,
    }
}

fn column_index(c: char) -> Option<i32> {
    match c {
        '0'..='9' => Some(c as i32 - '0' as i32),
        _ => letter_index(c),
    }
}

/// A validated two-character cell label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellLabel {
    label: String,
    coord: HexCoord,
}

impl CellLabel {
    /// Parse a label; `None` when it is not two characters from the table
    pub fn parse(label: &str) -> Option<Self> {
        Self::coord_of(label).map(|coord| Self {
            label: label.to_string(),
            coord,
        })
    }

    /// Coordinate addressed by a raw label, without allocating
    pub fn coord_of(label: &str) -> Option<HexCoord> {
        let mut chars = label.chars();
        let row = letter_index(chars.next()?)?;
        let col = column_index(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(HexCoord::new(row, col))
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The set of cells a scenario defines
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    cells: AHashMap<HexCoord, CellLabel>,
}

impl HexGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell. Returns the label already occupying the coordinate, if any.
    pub fn insert(&mut self, label: CellLabel) -> Option<CellLabel> {
        let coord = label.coord();
        match self.cells.get(&coord) {
            Some(existing) => Some(existing.clone()),
            None => {
                self.cells.insert(coord, label);
                None
            }
        }
    }

    fn cell(&self, label: &str) -> Option<&CellLabel> {
        let coord = CellLabel::coord_of(label)?;
        self.cells.get(&coord).filter(|cell| cell.as_str() == label)
    }
}

impl Topology for HexGrid {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Hex
    }

    fn contains_location(&self, label: &str) -> bool {
        self.cell(label).is_some()
    }

    fn is_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.cell(a), self.cell(b)) {
            (Some(a), Some(b)) => a.coord().is_adjacent(&b.coord()),
            _ => false,
        }
    }

    fn unit_between(&self, from: &str, to: &str) -> Option<UnitKey> {
        if !self.is_adjacent(from, to) {
            return None;
        }
        self.cell(to).cloned().map(UnitKey::Cell)
    }

    fn unit_at(&self, location: &str) -> Option<UnitKey> {
        self.cell(location).cloned().map(UnitKey::Cell)
    }

    fn resolve(&self, identity: &str) -> Option<UnitKey> {
        self.unit_at(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_labels() -> Vec<String> {
        ('A'..='J')
            .flat_map(|r| ('A'..='J').map(move |c| format!("{}{}", r, c)))
            .collect()
    }

    fn full_grid() -> HexGrid {
        let mut grid = HexGrid::new();
        for label in all_labels() {
            assert!(grid.insert(CellLabel::parse(&label).unwrap()).is_none());
        }
        grid
    }

    fn neighbor_count(grid: &HexGrid, label: &str) -> usize {
        all_labels()
            .iter()
            .filter(|other| grid.is_adjacent(label, other))
            .count()
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(CellLabel::coord_of("AA"), Some(HexCoord::new(0, 0)));
        assert_eq!(CellLabel::coord_of("CJ"), Some(HexCoord::new(2, 9)));
        assert_eq!(CellLabel::coord_of("B3"), Some(HexCoord::new(1, 3)));
        assert_eq!(CellLabel::coord_of("KA"), None);
        assert_eq!(CellLabel::coord_of("A"), None);
        assert_eq!(CellLabel::coord_of("AAA"), None);
        assert_eq!(CellLabel::coord_of("1A"), None);
        assert_eq!(CellLabel::coord_of(""), None);
    }

    #[test]
    fn test_interior_cells_have_six_neighbors() {
        let grid = full_grid();
        for row in 'B'..='I' {
            for col in 'B'..='I' {
                let label = format!("{}{}", row, col);
                assert_eq!(neighbor_count(&grid, &label), 6, "cell {}", label);
            }
        }
    }

    #[test]
    fn test_border_cells_have_fewer_neighbors() {
        let grid = full_grid();
        // Even column: diagonals go up, off the top row
        assert_eq!(neighbor_count(&grid, "AA"), 2);
        // Odd column on the top row still reaches down diagonally
        assert_eq!(neighbor_count(&grid, "AB"), 5);
        assert!(neighbor_count(&grid, "JE") < 6);
    }

    #[test]
    fn test_diagonals_follow_column_parity() {
        let grid = full_grid();
        // Column C (index 2, even): diagonals one row up
        assert!(grid.is_adjacent("DC", "CB"));
        assert!(grid.is_adjacent("DC", "CD"));
        assert!(!grid.is_adjacent("DC", "EB"));
        // Column D (index 3, odd): diagonals one row down
        assert!(grid.is_adjacent("DD", "EC"));
        assert!(grid.is_adjacent("DD", "EE"));
        assert!(!grid.is_adjacent("DD", "CC"));
    }

    #[test]
    fn test_adjacency_is_symmetric_and_irreflexive() {
        let grid = full_grid();
        let labels = all_labels();
        for a in &labels {
            assert!(!grid.is_adjacent(a, a));
            for b in &labels {
                assert_eq!(grid.is_adjacent(a, b), grid.is_adjacent(b, a), "{} {}", a, b);
            }
        }
    }

    #[test]
    fn test_unmapped_labels_are_not_adjacent() {
        let grid = full_grid();
        assert!(!grid.is_adjacent("AA", "ZZ"));
        assert!(!grid.is_adjacent("Z9", "AA"));
        assert!(grid.unit_between("AA", "KK").is_none());
    }

    #[test]
    fn test_missing_cells_are_not_adjacent() {
        let mut grid = HexGrid::new();
        grid.insert(CellLabel::parse("A1").unwrap());
        grid.insert(CellLabel::parse("A2").unwrap());
        assert!(grid.is_adjacent("A1", "A2"));
        assert!(!grid.is_adjacent("A2", "A3"));
        assert!(grid.unit_between("A1", "A2").is_some());
    }

    #[test]
    fn test_digit_and_letter_columns_collide() {
        let mut grid = HexGrid::new();
        assert!(grid.insert(CellLabel::parse("AB").unwrap()).is_none());
        let clash = grid.insert(CellLabel::parse("A1").unwrap());
        assert_eq!(clash.map(|c| c.to_string()), Some("AB".to_string()));
        // The grid only answers to the label it was built with
        assert!(grid.contains_location("AB"));
        assert!(!grid.contains_location("A1"));
    }
}
