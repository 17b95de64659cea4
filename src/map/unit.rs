//! Mine-bearing unit - a cell or an edge with its sensor readings and mine state

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use super::topology::UnitKey;
use crate::core::types::{ScoutId, SensorSource};

/// Mine life-cycle. Only ground-vehicle contact moves a unit along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineState {
    IntactNoMine,
    IntactWithMine,
    /// Detected and still blocking
    Found,
    /// Removed; terminal
    Cleared,
}

impl MineState {
    pub fn from_mine_present(present: bool) -> Self {
        if present {
            MineState::IntactWithMine
        } else {
            MineState::IntactNoMine
        }
    }

    /// A mine is physically in the unit
    pub fn mine_present(&self) -> bool {
        matches!(self, MineState::IntactWithMine | MineState::Found)
    }

}

/// What a single ground-vehicle contact did to a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Hidden mine detected; the vehicle must stay put
    Detected,
    /// Found mine removed; the vehicle advances
    Cleared,
    /// Nothing in the way; the vehicle advances
    Passable,
}

/// A cell or edge that may hold a mine
#[derive(Debug, Clone)]
pub struct MapUnit {
    pub key: UnitKey,
    /// Informational only
    pub terrain: String,
    state: MineState,
    confidence: AHashMap<SensorSource, f64>,
    scanned_by: AHashSet<ScoutId>,
    queried: AHashSet<SensorSource>,
}

impl MapUnit {
    pub fn new(key: UnitKey, terrain: impl Into<String>, mine_present: bool) -> Self {
        Self {
            key,
            terrain: terrain.into(),
            state: MineState::from_mine_present(mine_present),
            confidence: AHashMap::new(),
            scanned_by: AHashSet::new(),
            queried: AHashSet::new(),
        }
    }

    /// Attach the confidence a source will reveal when queried
    pub fn with_confidence(mut self, source: SensorSource, value: f64) -> Self {
        self.confidence.insert(source, value);
        self
    }

    pub fn state(&self) -> MineState {
        self.state
    }

    pub fn confidence(&self, source: SensorSource) -> Option<f64> {
        self.confidence.get(&source).copied()
    }

    pub fn is_scanned_by(&self, scout: ScoutId) -> bool {
        self.scanned_by.contains(&scout)
    }

    pub fn is_scanned(&self) -> bool {
        !self.scanned_by.is_empty()
    }

    pub fn mark_scanned(&mut self, scout: ScoutId) {
        self.scanned_by.insert(scout);
    }

    pub fn is_queried(&self, source: SensorSource) -> bool {
        self.queried.contains(&source)
    }

    /// Record a query. Returns false if the source was already charged here.
    pub fn mark_queried(&mut self, source: SensorSource) -> bool {
        self.queried.insert(source)
    }

    /// Whether the ground vehicle would be held back on entry
    pub fn blocks(&self) -> bool {
        self.state.mine_present()
    }

    /// Start location: no mine, ever
    pub fn make_safe(&mut self) {
        self.state = MineState::IntactNoMine;
    }

    /// Apply one ground-vehicle contact. Mined units take two contacts to pass.
    pub fn ground_contact(&mut self) -> Contact {
        match self.state {
            MineState::IntactWithMine => {
                self.state = MineState::Found;
                Contact::Detected
            }
            MineState::Found => {
                self.state = MineState::Cleared;
                Contact::Cleared
            }
            MineState::IntactNoMine | MineState::Cleared => Contact::Passable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::hex::CellLabel;

    fn unit(mined: bool) -> MapUnit {
        MapUnit::new(UnitKey::Cell(CellLabel::parse("B2").unwrap()), "Grass", mined)
    }

    #[test]
    fn test_mined_unit_needs_two_contacts() {
        let mut u = unit(true);
        assert!(u.blocks());
        assert_eq!(u.ground_contact(), Contact::Detected);
        assert_eq!(u.state(), MineState::Found);
        assert!(u.blocks());
        assert_eq!(u.ground_contact(), Contact::Cleared);
        assert_eq!(u.state(), MineState::Cleared);
        assert!(!u.blocks());
    }

    #[test]
    fn test_cleared_is_terminal() {
        let mut u = unit(true);
        u.ground_contact();
        u.ground_contact();
        for _ in 0..3 {
            assert_eq!(u.ground_contact(), Contact::Passable);
            assert_eq!(u.state(), MineState::Cleared);
        }
    }

    #[test]
    fn test_clean_unit_never_sets_found_or_cleared() {
        let mut u = unit(false);
        for _ in 0..3 {
            assert_eq!(u.ground_contact(), Contact::Passable);
        }
        assert_eq!(u.state(), MineState::IntactNoMine);
    }

    #[test]
    fn test_mine_present_until_cleared() {
        assert!(MineState::IntactWithMine.mine_present());
        assert!(MineState::Found.mine_present());
        assert!(!MineState::Cleared.mine_present());
        assert!(!MineState::IntactNoMine.mine_present());
    }

    #[test]
    fn test_query_marks_once() {
        let mut u = unit(false).with_confidence(SensorSource::Human, 0.4);
        assert_eq!(u.confidence(SensorSource::Human), Some(0.4));
        assert!(u.mark_queried(SensorSource::Human));
        assert!(!u.mark_queried(SensorSource::Human));
        assert!(u.is_queried(SensorSource::Human));
        assert!(!u.is_queried(SensorSource::Ai(ScoutId(1))));
    }

    #[test]
    fn test_scan_tracking() {
        let mut u = unit(false);
        assert!(!u.is_scanned());
        u.mark_scanned(ScoutId(2));
        assert!(u.is_scanned());
        assert!(u.is_scanned_by(ScoutId(2)));
        assert!(!u.is_scanned_by(ScoutId(1)));
    }
}
