//! Sensor query gate
//!
//! An estimate can be bought once per source per unit, and only after a
//! scout has flown over the unit. AI sources are tied to the scout whose
//! imagery they read; the human expert accepts imagery from any scout.

use super::outcome::Rejection;
use crate::core::config::MissionCosts;
use crate::core::types::{Cost, SensorSource};
use crate::map::MapUnit;

/// A successful query: what was revealed and what it cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub source: SensorSource,
    pub confidence: f64,
    pub cost: Cost,
}

/// Fixed price of a source
pub fn source_cost(source: SensorSource, costs: &MissionCosts) -> Cost {
    match source {
        SensorSource::Ai(_) => costs.ai_estimate,
        SensorSource::Human => costs.human_estimate,
    }
}

/// Check preconditions without touching the unit
pub fn check_query(unit: &MapUnit, source: SensorSource) -> Result<(), Rejection> {
    let scanned = match source {
        SensorSource::Ai(scout) => unit.is_scanned_by(scout),
        SensorSource::Human => unit.is_scanned(),
    };

    if !scanned {
        return Err(Rejection::NotScanned {
            unit: unit.key.to_string(),
            source,
        });
    }

    if unit.is_queried(source) {
        return Err(Rejection::AlreadyQueried {
            unit: unit.key.to_string(),
            source,
        });
    }

    Ok(())
}

/// Gate, mark and price a query against a unit
pub fn query(
    unit: &mut MapUnit,
    source: SensorSource,
    costs: &MissionCosts,
) -> Result<Estimate, Rejection> {
    check_query(unit, source)?;

    // A source missing from the scenario reads as no evidence either way
    let confidence = unit.confidence(source).unwrap_or(0.0);
    unit.mark_queried(source);

    Ok(Estimate {
        source,
        confidence,
        cost: source_cost(source, costs),
    })
}
