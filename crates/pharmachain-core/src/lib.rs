//! # PharmaChain Core
//!
//! Pure primitives for the PharmaChain event ledger: blocks, the block
//! hasher, and canonical encoding.
//!
//! This crate contains no I/O, no storage, no concurrency. It is pure
//! computation over hash-linked blocks.
//!
//! ## Key Types
//!
//! - [`Block`] - One immutable, hash-linked record in the ledger
//! - [`BlockData`] - The tagged payload: genesis marker or an event
//! - [`BlockHash`] - A SHA-256 digest, stored as lowercase hex
//! - [`ChainHead`] - Index and hash of the last block of a verified chain
//!
//! ## Canonicalization
//!
//! Block data is hashed over its canonical JSON encoding. See the
//! [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod hasher;
pub mod validation;

pub use block::{now_secs, Block, BlockData};
pub use canonical::{canonical_bytes, canonical_string};
pub use crypto::BlockHash;
pub use error::{ChainError, CoreError};
pub use hasher::{format_timestamp, hash_block, hash_genesis};
pub use validation::{verify_block, verify_chain, ChainHead};
