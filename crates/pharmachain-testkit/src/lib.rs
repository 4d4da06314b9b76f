//! # PharmaChain Testkit
//!
//! Testing utilities for PharmaChain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Reference blocks with expected canonical text and hashes
//! - **Generators**: Proptest strategies for payloads, timestamps, and chains
//! - **Fixtures**: Temp-dir ledgers and scripted reading sources
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding and hash scheme:
//!
//! ```rust
//! use pharmachain_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hash) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hash}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pharmachain_testkit::generators::chain;
//!
//! proptest! {
//!     #[test]
//!     fn generated_chains_verify(blocks in chain(16)) {
//!         prop_assert!(pharmachain_core::verify_chain(&blocks).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use pharmachain_testkit::fixtures::{ScriptedSource, TempLedger};
//!
//! let fixture = TempLedger::new();
//! let source = ScriptedSource::temps([35.0, 20.0]);
//! assert_eq!(source.remaining(), 2);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{build_chain, reading, ScriptedSource, TempLedger};
