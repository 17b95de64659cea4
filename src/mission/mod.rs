//! Mission layer - scenario loading, vehicles, sensor queries and the controller
//!
//! A mission owns one minefield and is driven one command at a time.
//! Callers that share a mission across threads wrap it in their own lock.

pub mod controller;
pub mod log;
pub mod outcome;
pub mod scenario;
pub mod sensors;
pub mod vehicles;

pub use controller::{Mission, MissionSnapshot, MISSION_SUCCESS};
pub use log::{FileLog, LogSink, MemoryLog, TracingLog};
pub use outcome::{GroundOutcome, Rejection};
pub use scenario::Scenario;
pub use sensors::Estimate;
pub use vehicles::{Fleet, GroundVehicle, Scout};
