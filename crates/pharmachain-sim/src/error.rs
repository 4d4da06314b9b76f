//! Error types for the simulation module.

use thiserror::Error;

/// Errors that can occur while controlling the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// `start` was called while a generator is running.
    #[error("simulation already running")]
    AlreadyRunning,

    /// Invalid start parameters or sampler configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
