//! In-memory implementation of the Ledger trait.
//!
//! This is primarily for testing. It has the same semantics as the file
//! ledger but keeps the chain in memory with no persistence.

use std::sync::RwLock;

use async_trait::async_trait;
use pharmachain_core::{now_secs, verify_chain, Block, ChainError, ChainHead};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::traits::{chain_tail, Ledger};

/// In-memory ledger.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
pub struct MemoryLedger {
    chain: RwLock<Vec<Block>>,
}

impl MemoryLedger {
    /// Create an empty ledger; genesis is materialized on first use.
    pub fn new() -> Self {
        Self {
            chain: RwLock::new(Vec::new()),
        }
    }

    /// Create a ledger holding `chain` as-is, without verification.
    ///
    /// Useful for exercising tamper detection.
    pub fn from_chain(chain: Vec<Block>) -> Self {
        Self {
            chain: RwLock::new(chain),
        }
    }

    /// Snapshot of the whole chain.
    pub fn snapshot(&self) -> Result<Vec<Block>> {
        let chain = self.chain.read().map_err(poisoned)?;
        Ok(chain.clone())
    }

    /// Materialize genesis if the chain is empty. Returns the chain guard.
    fn bootstrapped(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Block>>> {
        let mut chain = self.chain.write().map_err(poisoned)?;
        if chain.is_empty() {
            chain.push(Block::genesis(now_secs()));
        }
        Ok(chain)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn append(&self, event_type: &str, payload: Value) -> Result<Block> {
        let mut chain = self.bootstrapped()?;
        let tail = chain.last().ok_or(ChainError::Empty)?;
        let block = tail.successor(event_type, payload, now_secs());
        chain.push(block.clone());
        Ok(block)
    }

    async fn read(&self, limit: usize) -> Result<Vec<Block>> {
        let chain = self.bootstrapped()?;
        Ok(chain_tail(chain.clone(), limit))
    }

    async fn verify(&self) -> Result<ChainHead> {
        let chain = self.bootstrapped()?;
        Ok(verify_chain(&chain)?)
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Poisoned(e.to_string())
}
