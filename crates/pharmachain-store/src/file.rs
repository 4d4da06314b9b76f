//! Durable single-file implementation of the Ledger trait.
//!
//! The whole chain lives in one pretty-printed JSON array. Every append
//! re-reads the file, derives one block from the tail, and replaces the file
//! via temp-file-then-rename, all under an exclusive lock. File I/O runs on
//! `spawn_blocking` to keep the async runtime responsive.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pharmachain_core::{now_secs, verify_chain, Block, ChainError, ChainHead};
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info};

use crate::config::LedgerConfig;
use crate::error::{Result, StoreError};
use crate::traits::{chain_tail, Ledger};

/// File-based ledger.
///
/// Thread-safe via an internal `RwLock`: appends take it exclusively,
/// reads share it. Use one instance per chain file and share it behind an
/// `Arc`; separate instances on the same path do not coordinate.
pub struct FileLedger {
    config: LedgerConfig,
    lock: RwLock<()>,
    writer: ChainWriter,
}

/// Replaces the chain file with the given blocks.
type ChainWriter = fn(&Path, &[Block]) -> Result<()>;

impl FileLedger {
    /// Create a ledger over the configured path.
    ///
    /// No I/O happens here; the chain is bootstrapped on first use.
    pub fn open(config: LedgerConfig) -> Self {
        Self {
            config,
            lock: RwLock::new(()),
            writer: write_chain_file,
        }
    }

    #[cfg(test)]
    fn with_writer(mut self, writer: ChainWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Create a ledger at `path` with default settings.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::open(LedgerConfig::with_path(path))
    }

    /// The chain file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    async fn write_guard(&self) -> Result<RwLockWriteGuard<'_, ()>> {
        tokio::time::timeout(self.config.lock_timeout, self.lock.write())
            .await
            .map_err(|_| StoreError::LockTimeout(self.config.lock_timeout))
    }

    async fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>> {
        tokio::time::timeout(self.config.lock_timeout, self.lock.read())
            .await
            .map_err(|_| StoreError::LockTimeout(self.config.lock_timeout))
    }

    /// Load the persisted chain, `None` if no chain file exists yet.
    ///
    /// Caller must hold the lock.
    async fn load(&self, verify: bool) -> Result<Option<Vec<Block>>> {
        let path = self.config.path.clone();
        let loaded = tokio::task::spawn_blocking(move || read_chain_file(&path)).await??;

        if let Some(chain) = &loaded {
            if verify {
                if let Err(e) = verify_chain(chain) {
                    error!(path = %self.config.path.display(), error = %e, "persisted chain failed verification");
                    return Err(e.into());
                }
            } else if chain.is_empty() {
                return Err(ChainError::Empty.into());
            }
        }

        Ok(loaded)
    }

    /// Replace the persisted chain. Caller must hold the write lock.
    async fn persist(&self, chain: Vec<Block>) -> Result<()> {
        let path = self.config.path.clone();
        let writer = self.writer;
        tokio::task::spawn_blocking(move || writer(&path, &chain)).await?
    }

    /// Load the chain, writing the genesis block first if none exists.
    ///
    /// Caller must hold the write lock.
    async fn load_or_bootstrap(&self) -> Result<Vec<Block>> {
        if let Some(chain) = self.load(self.config.verify_on_load).await? {
            return Ok(chain);
        }

        let genesis = Block::genesis(now_secs());
        info!(path = %self.config.path.display(), hash = %genesis.hash, "bootstrapping ledger with genesis block");
        let chain = vec![genesis];
        self.persist(chain.clone()).await?;
        Ok(chain)
    }
}

#[async_trait]
impl Ledger for FileLedger {
    async fn append(&self, event_type: &str, payload: Value) -> Result<Block> {
        let _guard = self.write_guard().await?;

        let mut chain = self.load_or_bootstrap().await?;
        let tail = chain.last().ok_or(ChainError::Empty)?;
        let block = tail.successor(event_type, payload, now_secs());
        chain.push(block.clone());

        self.persist(chain).await?;
        debug!(index = block.index, event_type, hash = %block.hash, "appended block");
        Ok(block)
    }

    async fn read(&self, limit: usize) -> Result<Vec<Block>> {
        {
            let _guard = self.read_guard().await?;
            if let Some(chain) = self.load(self.config.verify_on_load).await? {
                return Ok(chain_tail(chain, limit));
            }
        }

        // No chain yet: bootstrap under the write lock.
        let _guard = self.write_guard().await?;
        let chain = self.load_or_bootstrap().await?;
        Ok(chain_tail(chain, limit))
    }

    async fn verify(&self) -> Result<ChainHead> {
        {
            let _guard = self.read_guard().await?;
            if let Some(chain) = self.load(false).await? {
                return Ok(verify_chain(&chain)?);
            }
        }

        let _guard = self.write_guard().await?;
        let chain = self.load_or_bootstrap().await?;
        Ok(verify_chain(&chain)?)
    }
}

/// Read and parse the chain file. A missing file is `Ok(None)`.
fn read_chain_file(path: &Path) -> Result<Option<Vec<Block>>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let chain: Vec<Block> = serde_json::from_slice(&bytes)?;
    Ok(Some(chain))
}

/// Atomically replace the chain file.
///
/// Writes a temp file in the same directory, syncs it, then renames it over
/// the target. On any failure the old file is untouched.
fn write_chain_file(path: &Path, chain: &[Block]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let bytes = serde_json::to_vec_pretty(chain)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
