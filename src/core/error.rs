use thiserror::Error;

/// Fatal failures. Only construction can fail this way; rejected commands
/// are reported through sentinel return values instead.
#[derive(Error, Debug)]
pub enum MinefieldError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    SettingsError(#[from] toml::de::Error),

    #[error("Scenario is missing the '{0}' section")]
    MissingSection(String),

    #[error("Invalid cell label: {0:?}")]
    InvalidLabel(String),

    #[error("Duplicate map unit: {0}")]
    DuplicateUnit(String),

    #[error("Unknown topology: {0:?}")]
    UnknownTopology(String),

    #[error("{role} location {label:?} is not on the map")]
    UnknownLocation { role: &'static str, label: String },

    #[error("Unit {unit} carries {found} AI estimates but the mission fields {expected} scouts")]
    SensorMismatch {
        unit: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid mission costs: {0}")]
    InvalidCosts(String),

    #[error("Malformed scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, MinefieldError>;
