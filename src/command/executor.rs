//! Command execution - applies parsed commands to a mission

use crate::command::parser::MissionCommand;
use crate::core::types::Cost;
use crate::mission::{GroundOutcome, Mission};

/// Executes operator commands against a mission
pub struct CommandExecutor;

impl CommandExecutor {
    /// Run one command. Driver-only commands (status, help, quit) are not
    /// mission commands and report `accepted: false` with no log line.
    pub fn execute(mission: &mut Mission, command: &MissionCommand) -> ExecutionResult {
        let before = mission.total();

        let accepted = match command {
            MissionCommand::Select(identity) => mission.select(identity).is_some(),
            MissionCommand::MoveScout { scout, destination } => {
                let scout = scout.unwrap_or_else(|| mission.lead_scout());
                mission.move_scout(scout, destination).is_some()
            }
            MissionCommand::MoveGround(destination) => {
                let outcome = mission.move_ground(destination);
                return ExecutionResult {
                    accepted: outcome != GroundOutcome::Rejected,
                    ground_outcome: Some(outcome),
                    charged: mission.total() - before,
                    message: Some(mission.current_log().to_string()),
                };
            }
            MissionCommand::QueryAi(scout) => mission.query_ai(*scout),
            MissionCommand::QueryHuman => mission.query_human(),
            MissionCommand::Status | MissionCommand::Help | MissionCommand::Quit => {
                return ExecutionResult::default();
            }
        };

        ExecutionResult {
            accepted,
            ground_outcome: None,
            charged: mission.total() - before,
            message: Some(mission.current_log().to_string()),
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    /// The mission carried out the command
    pub accepted: bool,
    /// Set for ground moves
    pub ground_outcome: Option<GroundOutcome>,
    /// Cost added to the mission total by this command
    pub charged: Cost,
    /// Mission log line after the command
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parser::parse_command;
    use crate::mission::MemoryLog;

    const EDGES: &str = r#"{
        "edges": [
            {"from": "S", "to": "M", "landmine_present": 0, "ai_estimate": 0.1,
             "human_estimate": 0.3, "terrain_type": "Road"},
            {"from": "M", "to": "E", "landmine_present": 1, "ai_estimate": 0.7,
             "human_estimate": 0.9, "terrain_type": "Bridge"}
        ],
        "mission": {
            "start": "S", "end": "E",
            "human estimate time": 8, "AI estimate time": 3,
            "UGV traversal time": 5, "UGV clear time": 10, "UAV traversal time": 2
        }
    }"#;

    fn run(mission: &mut Mission, line: &str) -> ExecutionResult {
        let command = parse_command(line).unwrap();
        CommandExecutor::execute(mission, &command)
    }

    #[test]
    fn test_scripted_edge_mission() {
        let mut mission = Mission::from_json(EDGES, Box::new(MemoryLog::new())).unwrap();

        let scan = run(&mut mission, "uav m");
        assert!(scan.accepted);
        assert_eq!(scan.charged, 2);

        let human = run(&mut mission, "human");
        assert!(human.accepted);
        assert_eq!(human.charged, 8);

        assert_eq!(run(&mut mission, "ugv m").ground_outcome, Some(GroundOutcome::Moved));

        let found = run(&mut mission, "ugv e");
        assert_eq!(found.ground_outcome, Some(GroundOutcome::MineFound));
        assert_eq!(found.charged, 5);

        let cleared = run(&mut mission, "ugv e");
        assert_eq!(cleared.ground_outcome, Some(GroundOutcome::MineCleared));
        assert_eq!(cleared.charged, 10);
        assert_eq!(cleared.message.as_deref(), Some("MISSION SUCCESS"));
        assert_eq!(mission.total(), 2 + 8 + 5 + 5 + 10);
    }

    #[test]
    fn test_rejections_charge_nothing() {
        let mut mission = Mission::from_json(EDGES, Box::new(MemoryLog::new())).unwrap();
        let far = run(&mut mission, "ugv e");
        assert!(!far.accepted);
        assert_eq!(far.ground_outcome, Some(GroundOutcome::Rejected));
        assert_eq!(far.charged, 0);

        let unscanned = run(&mut mission, "select s m");
        assert!(unscanned.accepted);
        let ai = run(&mut mission, "ai");
        assert!(!ai.accepted);
        assert_eq!(ai.charged, 0);
        assert!(ai.message.unwrap().contains("has not scanned"));
    }

    #[test]
    fn test_driver_commands_do_not_touch_mission() {
        let mut mission = Mission::from_json(EDGES, Box::new(MemoryLog::new())).unwrap();
        assert_eq!(run(&mut mission, "status"), ExecutionResult::default());
        assert_eq!(mission.current_log(), "");
    }
}
