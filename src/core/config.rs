//! Mission cost table and session settings
//!
//! Costs come from the scenario's `mission` section and never change during
//! a session. Session settings only affect the driver (logging destination
//! and filter) and are optional.

use crate::core::error::Result;
use crate::core::types::{Cost, ScoutId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest cost a single command may charge
pub const MAX_COMMAND_COST: Cost = u32::MAX as Cost;

/// Fixed costs charged by mission commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionCosts {
    /// Charged once per unit per AI source
    pub ai_estimate: Cost,
    /// Charged once per unit for the human expert
    pub human_estimate: Cost,
    /// Charged for every ground move attempt that is not a clearance
    pub ugv_traversal: Cost,
    /// Charged when the ground vehicle clears a found mine
    pub ugv_clear: Cost,
    /// One traversal cost per scout, in scout order
    pub uav_traversal: Vec<Cost>,
}

impl MissionCosts {
    /// Number of scouts this cost table describes
    pub fn scout_count(&self) -> usize {
        self.uav_traversal.len()
    }

    /// Traversal cost of a given scout
    pub fn uav_traversal_for(&self, scout: ScoutId) -> Option<Cost> {
        if scout.0 == 0 {
            return None;
        }
        self.uav_traversal.get(scout.index()).copied()
    }

    /// Validate the table for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.uav_traversal.is_empty() {
            return Err("at least one UAV traversal time is required".into());
        }

        let fixed = [
            ("AI estimate", self.ai_estimate),
            ("human estimate", self.human_estimate),
            ("UGV traversal", self.ugv_traversal),
            ("UGV clear", self.ugv_clear),
        ];
        let scouts = self
            .uav_traversal
            .iter()
            .map(|&cost| ("UAV traversal", cost));
        if let Some((name, cost)) = fixed
            .into_iter()
            .chain(scouts)
            .find(|&(_, cost)| cost > MAX_COMMAND_COST)
        {
            return Err(format!(
                "{} cost {} exceeds the limit of {}",
                name, cost, MAX_COMMAND_COST
            ));
        }

        if self.uav_traversal.len() > u8::MAX as usize {
            return Err(format!(
                "{} scouts configured, at most {} supported",
                self.uav_traversal.len(),
                u8::MAX
            ));
        }

        Ok(())
    }

    /// One-line description of the mission's cost constants
    pub fn summary(&self) -> String {
        let uav = self
            .uav_traversal
            .iter()
            .enumerate()
            .map(|(i, cost)| format!("{} Traversal Time - {}", ScoutId::from_index(i), cost))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{}, Cost of Human Estimate - {}, Cost of AI Estimate - {}, UGV Traversal Time - {}, UGV Clear Time - {}",
            uav, self.human_estimate, self.ai_estimate, self.ugv_traversal, self.ugv_clear
        )
    }
}

/// Driver-level settings, read from an optional TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Directory that receives timestamped mission log files
    pub log_dir: PathBuf,
    /// `tracing` env-filter directive for diagnostics
    pub log_filter: String,
    /// Print every mission log line to stdout as well
    pub echo: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_filter: "minefield=info".to_string(),
            echo: true,
        }
    }
}

impl SessionSettings {
    /// Parse settings from TOML text; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load settings from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(scouts: Vec<Cost>) -> MissionCosts {
        MissionCosts {
            ai_estimate: 3,
            human_estimate: 7,
            ugv_traversal: 5,
            ugv_clear: 10,
            uav_traversal: scouts,
        }
    }

    #[test]
    fn test_validate_requires_a_scout() {
        assert!(costs(vec![]).validate().is_err());
        assert!(costs(vec![2]).validate().is_ok());
        assert!(costs(vec![2, 4]).validate().is_ok());
    }

    #[test]
    fn test_validate_bounds_each_cost() {
        let mut table = costs(vec![2, 4]);
        table.ugv_traversal = Cost::MAX;
        let err = table.validate().unwrap_err();
        assert!(err.contains("UGV traversal"));

        let mut table = costs(vec![2, MAX_COMMAND_COST + 1]);
        assert!(table.validate().unwrap_err().contains("UAV traversal"));
        table.uav_traversal[1] = MAX_COMMAND_COST;
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_uav_traversal_lookup() {
        let table = costs(vec![2, 4]);
        assert_eq!(table.uav_traversal_for(ScoutId(1)), Some(2));
        assert_eq!(table.uav_traversal_for(ScoutId(2)), Some(4));
        assert_eq!(table.uav_traversal_for(ScoutId(3)), None);
        assert_eq!(table.uav_traversal_for(ScoutId(0)), None);
    }

    #[test]
    fn test_summary_lists_every_scout() {
        let summary = costs(vec![2, 4]).summary();
        assert!(summary.contains("UAV 1 Traversal Time - 2"));
        assert!(summary.contains("UAV 2 Traversal Time - 4"));
        assert!(summary.contains("UGV Clear Time - 10"));
    }

    #[test]
    fn test_settings_defaults_fill_missing_keys() {
        let settings = SessionSettings::from_toml("echo = false").unwrap();
        assert!(!settings.echo);
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
        assert_eq!(settings.log_filter, "minefield=info");
    }

    #[test]
    fn test_settings_rejects_bad_toml() {
        assert!(SessionSettings::from_toml("echo = ").is_err());
    }
}
