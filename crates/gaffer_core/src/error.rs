use crate::models::TeamId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaMismatch { found: u8, expected: u8 },

    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    #[error("Simulation worker is busy")]
    Busy,

    #[error("Simulation worker timed out after {seconds}s")]
    WorkerTimeout { seconds: u64 },

    #[error("Simulation worker channel closed")]
    WorkerGone,
}

impl EngineError {
    /// Whether the caller can safely retry after this error. Worker-side
    /// failures never mutate the caller's snapshot, so they are all
    /// retryable; a bad request will fail the same way every time.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::MalformedRequest(_) => false,
            EngineError::SchemaMismatch { .. } => false,
            EngineError::UnknownTeam(_) => false,
            EngineError::UnsupportedConfig(_) => false,
            EngineError::Busy => true,
            EngineError::WorkerTimeout { .. } => true,
            EngineError::WorkerGone => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
