//! Ledger trait: the abstract interface for chain persistence.
//!
//! This trait keeps callers storage-agnostic. Implementations include a
//! single JSON file (primary) and in-memory (for tests).

use async_trait::async_trait;
use pharmachain_core::{Block, ChainHead};
use serde_json::Value;

use crate::error::Result;

/// The Ledger trait: async interface for the hash-linked event chain.
///
/// # Contract
///
/// - **Append is atomic**: concurrent `append` calls never observe the same
///   tail. Each returns a block with a distinct, contiguous index in the
///   order the calls acquired the ledger.
/// - **Reads see whole chains**: a `read` overlapping an `append` returns
///   either the pre-append or the post-append chain.
/// - **Bootstrap**: a ledger with no chain materializes the genesis block
///   before serving the first `append`, `read`, or `verify`.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Extend the chain by exactly one block with data
    /// `{eventType, payload}` and return it.
    ///
    /// On failure the previously persisted chain is left unchanged.
    async fn append(&self, event_type: &str, payload: Value) -> Result<Block>;

    /// Return at most `limit` most-recent blocks, oldest first.
    async fn read(&self, limit: usize) -> Result<Vec<Block>>;

    /// Re-verify the whole chain and return its head.
    async fn verify(&self) -> Result<ChainHead>;
}

/// Keep the last `limit` blocks of `chain`, preserving order.
pub(crate) fn chain_tail(mut chain: Vec<Block>, limit: usize) -> Vec<Block> {
    let start = chain.len().saturating_sub(limit);
    chain.split_off(start)
}
