//! # PharmaChain Store
//!
//! The ledger store: the single serialization point for every append to
//! the event chain.
//!
//! ## Overview
//!
//! The [`Ledger`] trait abstracts chain persistence so callers (the API
//! layer, the telemetry generator) never touch the storage directly. The
//! primary implementation is [`FileLedger`], which keeps the whole chain in
//! one JSON document; [`MemoryLedger`] is for tests.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for append, read, and verify
//! - [`FileLedger`] - Durable single-file storage
//! - [`MemoryLedger`] - In-memory storage for tests
//! - [`LedgerConfig`] - Path, lock timeout, and load-time verification
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pharmachain_store::{FileLedger, Ledger, LedgerConfig};
//! use serde_json::json;
//!
//! async fn example() {
//!     let ledger = FileLedger::open(LedgerConfig::default());
//!
//!     let block = ledger
//!         .append("REGISTER_BATCH", json!({"batchId": "BATCH-001", "manufacturer": "Acme"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.index, 1);
//!
//!     let tail = ledger.read(50).await.unwrap();
//!     assert_eq!(tail.last(), Some(&block));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Single writer**: every append holds an exclusive lock across its
//!   read-modify-write cycle, so indices are contiguous and totally ordered.
//! - **Atomic visibility**: the extended chain is written to a temp file and
//!   renamed over the old one; readers see the pre- or post-append chain.
//! - **Bounded waits**: lock acquisition fails with `LockTimeout` instead of
//!   hanging behind a stalled write.
//! - **Lazy bootstrap**: the genesis block is materialized on first use.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use config::LedgerConfig;
pub use error::{Result, StoreError};
pub use file::FileLedger;
pub use memory::MemoryLedger;
pub use traits::Ledger;
