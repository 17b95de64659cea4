pub mod config;
pub mod error;
pub mod types;

pub use config::{MissionCosts, SessionSettings};
pub use error::{MinefieldError, Result};
