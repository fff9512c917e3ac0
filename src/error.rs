use thiserror::Error;

/// Faults raised by the simulation or its configuration.
///
/// Hitting a wall or the snake itself is not a fault; those outcomes are
/// reported through [`crate::game::StepResult`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no free cell left for an apple")]
    GameFull,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
