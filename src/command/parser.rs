//! Parse typed operator commands into structured mission commands
//!
//! Location and unit arguments are upper-cased, matching how operators
//! type cell labels ("b3" means "B3").

use thiserror::Error;

use crate::core::types::ScoutId;

/// A command the operator can issue against a mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionCommand {
    /// Select a unit ("B3", "A-B")
    Select(String),
    /// Move a scout; `None` means the first scout
    MoveScout {
        scout: Option<ScoutId>,
        destination: String,
    },
    /// Move the ground vehicle
    MoveGround(String),
    /// Query an AI estimate for the selection
    QueryAi(Option<ScoutId>),
    /// Query the human estimate for the selection
    QueryHuman,
    /// Show mission state
    Status,
    Help,
    Quit,
}

/// Input that does not form a command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid scout number: {0}")]
    InvalidScout(String),
}

const SELECT_USAGE: &str = "select <unit>";
const UAV_USAGE: &str = "uav [scout] <destination>";
const UGV_USAGE: &str = "ugv <destination>";
const AI_USAGE: &str = "ai [scout]";

/// Parse one line of operator input
pub fn parse_command(input: &str) -> Result<MissionCommand, CommandError> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match verb.to_ascii_lowercase().as_str() {
        "select" | "sel" => {
            if args.is_empty() {
                return Err(CommandError::Usage(SELECT_USAGE));
            }
            // Edge identities may be typed with a space: "select A B"
            Ok(MissionCommand::Select(args.join(" ").to_ascii_uppercase()))
        }
        "uav" | "scout" => match args.as_slice() {
            [destination] => Ok(MissionCommand::MoveScout {
                scout: None,
                destination: destination.to_ascii_uppercase(),
            }),
            [scout, destination] => Ok(MissionCommand::MoveScout {
                scout: Some(parse_scout(scout)?),
                destination: destination.to_ascii_uppercase(),
            }),
            _ => Err(CommandError::Usage(UAV_USAGE)),
        },
        "ugv" | "ground" => match args.as_slice() {
            [destination] => Ok(MissionCommand::MoveGround(destination.to_ascii_uppercase())),
            _ => Err(CommandError::Usage(UGV_USAGE)),
        },
        "ai" => match args.as_slice() {
            [] => Ok(MissionCommand::QueryAi(None)),
            [scout] => Ok(MissionCommand::QueryAi(Some(parse_scout(scout)?))),
            _ => Err(CommandError::Usage(AI_USAGE)),
        },
        "human" => Ok(MissionCommand::QueryHuman),
        "status" | "s" => Ok(MissionCommand::Status),
        "help" | "h" | "?" => Ok(MissionCommand::Help),
        "quit" | "q" | "exit" => Ok(MissionCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_scout(text: &str) -> Result<ScoutId, CommandError> {
    match text.parse::<u8>() {
        Ok(n) if n > 0 => Ok(ScoutId(n)),
        _ => Err(CommandError::InvalidScout(text.to_string())),
    }
}

/// Help text for the interactive driver
pub fn help_text() -> &'static str {
    "Commands:
  select <unit>          - Select a cell (B3) or edge (A-B)
  uav [scout] <dest>     - Move a scout one step and scan what it crosses
  ugv <dest>             - Move the ground vehicle one step
  ai [scout]             - Query the AI estimate for the selected unit
  human                  - Query the human estimate for the selected unit
  status / s             - Show mission state
  help / h               - Show this help
  quit / q               - Exit"
}
