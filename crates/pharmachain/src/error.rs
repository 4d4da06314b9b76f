//! Error types for the PharmaChain facade.

use pharmachain_sim::SimError;
use pharmachain_store::StoreError;
use thiserror::Error;

/// Errors that can occur during PharmaChain operations.
#[derive(Debug, Error)]
pub enum PharmaError {
    /// Ledger storage error, including integrity failures on load.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Simulation control error.
    #[error("simulation error: {0}")]
    Simulation(#[from] SimError),

    /// An event payload could not be converted to a JSON value.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl PharmaError {
    /// True when the error reports a `start` while already running.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PharmaError::Simulation(SimError::AlreadyRunning))
    }

    /// True when the error reports a broken chain.
    pub fn is_integrity(&self) -> bool {
        matches!(self, PharmaError::Store(StoreError::Integrity(_)))
    }
}

/// Result type for PharmaChain operations.
pub type Result<T> = std::result::Result<T, PharmaError>;
