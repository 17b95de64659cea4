//! Operator command pipeline
//!
//! Text line -> parse_command -> MissionCommand -> CommandExecutor -> Mission

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, ExecutionResult};
pub use parser::{help_text, parse_command, CommandError, MissionCommand};
