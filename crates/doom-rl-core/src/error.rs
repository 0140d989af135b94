//! Error types for Doom-RL

use thiserror::Error;

/// Result type for Doom-RL operations
pub type Result<T> = std::result::Result<T, DoomRlError>;

/// Doom-RL error types
#[derive(Debug, Error)]
pub enum DoomRlError {
    /// Simulator does not expose the requested game variable
    #[error("Missing game variable: {0}")]
    MissingVariable(String),

    /// Step info lacks an expected numeric field
    #[error("Missing info key: {0}")]
    MissingInfoKey(String),

    /// Scenario identifier not recognised
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Sequence name not recognised
    #[error("Unknown sequence '{name}'. Available: {available:?}")]
    UnknownSequence {
        name: String,
        available: Vec<String>,
    },

    /// Recorded trace has no frame left for this step
    #[error("Trace exhausted after {0} steps, call reset")]
    TraceExhausted(usize),

    /// Wrapped simulator failure
    #[error("Simulation error: {0}")]
    Simulation(String),

    /// Invalid shaping or launcher configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem or process error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for DoomRlError {
    fn from(err: serde_json::Error) -> Self {
        DoomRlError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DoomRlError {
    fn from(err: std::io::Error) -> Self {
        DoomRlError::Io(err.to_string())
    }
}
