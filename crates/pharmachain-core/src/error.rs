//! Error types for the PharmaChain core.

use thiserror::Error;

use crate::crypto::BlockHash;

/// Core errors that can occur while handling block primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

/// Integrity violations detected while verifying a chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    #[error("chain is empty")]
    Empty,

    #[error("block at position {position} has index {index}")]
    IndexMismatch { position: u64, index: u64 },

    #[error("block 0 is not a genesis block: {0}")]
    BadGenesis(String),

    #[error("block {index} is not a genesis block but carries a genesis marker")]
    MisplacedGenesis { index: u64 },

    #[error("block {index} prev_hash {got} does not match predecessor hash {expected}")]
    LinkageMismatch {
        index: u64,
        expected: BlockHash,
        got: BlockHash,
    },

    #[error("block {index} hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        index: u64,
        stored: BlockHash,
        computed: BlockHash,
    },
}
