//! # PharmaChain
//!
//! A tamper-evident, append-only ledger for pharmaceutical shipment events,
//! with a telemetry simulation that raises alerts into it.
//!
//! ## Overview
//!
//! - **Ledger**: a hash-linked chain of blocks persisted as one JSON
//!   document. Every block's hash covers its data, timestamp, and
//!   predecessor's hash, so any edit breaks verification.
//! - **Simulation**: a background generator samples cold-chain telemetry
//!   for a roster of shipments and appends an `ALERT` block whenever a
//!   reading is tampered or out of the 2..30 degree band.
//!
//! ## Key Concepts
//!
//! - **Block**: Immutable. Never edited. Changes are new blocks.
//! - **Genesis**: Block 0, `{"genesis": true}`, created on first use.
//! - **Single writer**: All appends are serialized by the ledger lock.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pharmachain::{PharmaChain, PharmaConfig};
//!
//! async fn example() {
//!     let chain = PharmaChain::open(PharmaConfig::from_env());
//!
//!     // Record a batch
//!     let block = chain.register_batch("BATCH-001", "Acme").await.unwrap();
//!     assert_eq!(block.event_type(), Some("REGISTER_BATCH"));
//!
//!     // Run the telemetry simulation for three shipments
//!     let roster = chain.start_simulation(3, 2.0).await.unwrap();
//!     assert_eq!(roster[0], "SHIP-SIM-1");
//!
//!     // ...
//!
//!     chain.stop_simulation().await;
//!     let tail = chain.get_chain_tail(50).await.unwrap();
//!     println!("{} blocks", tail.len());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `pharmachain::core` - Blocks, hashing, canonical encoding, verification
//! - `pharmachain::store` - The `Ledger` trait and its file/memory stores
//! - `pharmachain::sim` - Telemetry generation and simulation control

pub mod config;
pub mod error;
pub mod service;

// Re-export component crates
pub use pharmachain_core as core;
pub use pharmachain_sim as sim;
pub use pharmachain_store as store;

// Re-export main types for convenience
pub use config::PharmaConfig;
pub use error::{PharmaError, Result};
pub use service::{PharmaChain, REGISTER_BATCH_EVENT};

// Re-export commonly used component types
pub use pharmachain_core::{Block, BlockData, BlockHash, ChainHead};
pub use pharmachain_sim::{MemorySink, NullSink, SimulationStatus, TelemetrySink, ALERT_EVENT};
pub use pharmachain_store::{FileLedger, Ledger, LedgerConfig, MemoryLedger};
