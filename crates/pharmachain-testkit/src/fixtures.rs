//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use pharmachain::{PharmaChain, PharmaConfig};
use pharmachain_core::Block;
use pharmachain_sim::{Reading, ReadingSource};
use pharmachain_store::{FileLedger, LedgerConfig};
use serde_json::Value;
use tempfile::TempDir;

/// A file ledger in a private temp directory, removed on drop.
pub struct TempLedger {
    dir: TempDir,
    ledger: Arc<FileLedger>,
}

impl TempLedger {
    /// Create a new ledger at `<tmp>/ledger.json` with default settings.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create with custom settings; the path is replaced.
    pub fn with_config(mut config: LedgerConfig) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        config.path = dir.path().join("ledger.json");
        Self {
            ledger: Arc::new(FileLedger::open(config)),
            dir,
        }
    }

    pub fn ledger(&self) -> Arc<FileLedger> {
        Arc::clone(&self.ledger)
    }

    /// The chain file path.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("ledger.json")
    }

    /// A fresh ledger handle over the same file, as after a restart.
    pub fn reopen(&self) -> FileLedger {
        FileLedger::at(self.path())
    }

    /// A file-backed service over this ledger's path.
    pub fn service(&self) -> PharmaChain {
        let mut config = PharmaConfig::default();
        config.ledger.path = self.path();
        PharmaChain::open(config)
    }

    /// Overwrite the chain file with `chain`, bypassing the ledger.
    pub fn write_raw(&self, chain: &[Block]) {
        let text = serde_json::to_string_pretty(chain).expect("serialize chain");
        std::fs::write(self.path(), text).expect("write chain file");
    }

    /// Replace `from` with `to` in the chain file text.
    pub fn tamper(&self, from: &str, to: &str) {
        let text = std::fs::read_to_string(self.path()).expect("read chain file");
        assert!(text.contains(from), "{from:?} not found in chain file");
        std::fs::write(self.path(), text.replacen(from, to, 1)).expect("write chain file");
    }
}

impl Default for TempLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// A reading source that replays scripted `(temp, tamper)` pairs.
///
/// Once the script runs out every reading is a normal 20 degrees.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<(f64, bool)>,
}

impl ScriptedSource {
    /// Script temperatures with the tamper flag clear.
    pub fn temps(temps: impl IntoIterator<Item = f64>) -> Self {
        Self::new(temps.into_iter().map(|t| (t, false)))
    }

    pub fn new(script: impl IntoIterator<Item = (f64, bool)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ReadingSource for ScriptedSource {
    fn sample(&mut self, shipment_id: &str, timestamp: f64) -> Reading {
        let (temp, tamper) = self.script.pop_front().unwrap_or((20.0, false));
        reading(shipment_id, temp, tamper, timestamp)
    }
}

/// A reading at the default base point with fixed humidity and pressure.
pub fn reading(shipment_id: &str, temp: f64, tamper: bool, timestamp: f64) -> Reading {
    Reading {
        shipment_id: shipment_id.to_string(),
        timestamp,
        lat: 12.9716,
        lon: 77.5946,
        temp,
        humidity: 40.0,
        pressure: 1008.0,
        tamper,
    }
}

/// Build a valid chain: genesis at `start`, then one block per event one
/// second apart.
pub fn build_chain(events: &[(String, Value)], start: f64) -> Vec<Block> {
    let mut chain = vec![Block::genesis(start)];
    for (i, (event_type, payload)) in events.iter().enumerate() {
        let next = chain[i].successor(event_type.clone(), payload.clone(), start + (i + 1) as f64);
        chain.push(next);
    }
    chain
}
