//! Error types for the store module.

use std::time::Duration;

use pharmachain_core::ChainError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing the chain.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chain serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The persisted chain failed verification.
    #[error("integrity error: {0}")]
    Integrity(#[from] ChainError),

    /// The ledger lock could not be acquired in time.
    #[error("timed out after {0:?} waiting for the ledger lock")]
    LockTimeout(Duration),

    /// A lock was poisoned by a panicking holder.
    #[error("ledger lock poisoned: {0}")]
    Poisoned(String),

    /// A blocking storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        StoreError::Task(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
