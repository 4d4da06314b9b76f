//! Golden test vectors for deterministic verification.
//!
//! Each vector is one block of a reference chain, in order. The expected
//! canonical text and digest are pinned from ledger files already in the
//! field, so a match here means those files keep verifying.

use pharmachain_core::{canonical_string, Block, BlockData};
use serde_json::json;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Block data.
    pub data: BlockData,
    /// Block timestamp, epoch seconds.
    pub timestamp: f64,
    /// Expected canonical encoding of `data`.
    pub canonical_data: &'static str,
    /// Expected block hash (hex).
    pub expected_hash: &'static str,
}

/// Get all golden test vectors, in chain order.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis",
            data: BlockData::genesis(),
            timestamp: 1_700_000_000.0,
            canonical_data: r#"{"genesis": true}"#,
            expected_hash: "4b448eee8afb100ead56953e9120ab94b430b22fe897fb1b9c6770f76fba2143",
        },
        GoldenVector {
            name: "batch registration",
            data: BlockData::event(
                "REGISTER_BATCH",
                json!({"batchId": "BATCH-001", "manufacturer": "Acme"}),
            ),
            timestamp: 1_700_000_000.5,
            canonical_data: r#"{"eventType": "REGISTER_BATCH", "payload": {"batchId": "BATCH-001", "manufacturer": "Acme"}}"#,
            expected_hash: "e093d863b370bf790666327627d1f824e695bc094b444b2faa573ee310da3ae6",
        },
        GoldenVector {
            name: "temperature alert",
            data: BlockData::event(
                "ALERT",
                json!({"shipmentId": "SHIP-SIM-1", "temp": 35.0, "tamper": false, "timestamp": 1_700_000_002.25}),
            ),
            timestamp: 1_700_000_002.25,
            canonical_data: r#"{"eventType": "ALERT", "payload": {"shipmentId": "SHIP-SIM-1", "tamper": false, "temp": 35.0, "timestamp": 1700000002.25}}"#,
            expected_hash: "7e0528a1425ed6e67ab2fbcf48995dec646b8f011481573a07bc773bb2136a59",
        },
        GoldenVector {
            name: "non-ascii note with mixed array",
            data: BlockData::event(
                "QA_NOTE",
                json!({"note": "Caf\u{e9} \u{2713}", "lot": [1, 2.5, 1e-5, true, null], "qty": 100}),
            ),
            timestamp: 1_700_000_010.125,
            canonical_data: r#"{"eventType": "QA_NOTE", "payload": {"lot": [1, 2.5, 1e-05, true, null], "note": "Caf\u00e9 \u2713", "qty": 100}}"#,
            expected_hash: "59244ef49712a1c07ad35f25e49447bc4bdc79d7b8676c5424c8f8e5084c68fa",
        },
        GoldenVector {
            name: "tamper alert",
            data: BlockData::event(
                "ALERT",
                json!({"shipmentId": "SHIP-SIM-3", "temp": 1.99, "tamper": true, "timestamp": 1_700_000_011.0}),
            ),
            timestamp: 1_700_000_011.0,
            canonical_data: r#"{"eventType": "ALERT", "payload": {"shipmentId": "SHIP-SIM-3", "tamper": true, "temp": 1.99, "timestamp": 1700000011.0}}"#,
            expected_hash: "c96df857b8812a1b19b321df32f3c4ed814002bcb49382f839741be5a21b179f",
        },
    ]
}

/// Build the reference chain the vectors describe.
pub fn reference_chain() -> Vec<Block> {
    let mut chain: Vec<Block> = Vec::new();
    for vector in all_vectors() {
        let block = match (chain.last(), &vector.data) {
            (None, _) => Block::genesis(vector.timestamp),
            (Some(prev), BlockData::Event { event_type, payload }) => {
                prev.successor(event_type.clone(), payload.clone(), vector.timestamp)
            }
            (Some(_), BlockData::Genesis { .. }) => {
                panic!("vector '{}': genesis data after block 0", vector.name)
            }
        };
        chain.push(block);
    }
    chain
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, computed_hash)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .zip(reference_chain())
        .map(|(v, block)| {
            let hex = block.hash.to_hex();
            let matches = hex == v.expected_hash
                && canonical_string(&v.data.to_value()) == v.canonical_data;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmachain_core::verify_chain;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "vector '{name}' mismatched, computed {hex}");
        }
    }

    #[test]
    fn test_canonical_text_per_vector() {
        for vector in all_vectors() {
            assert_eq!(
                canonical_string(&vector.data.to_value()),
                vector.canonical_data,
                "vector '{}'",
                vector.name
            );
        }
    }

    #[test]
    fn test_reference_chain_verifies() {
        let chain = reference_chain();
        let head = verify_chain(&chain).unwrap();
        assert_eq!(head.len() as usize, all_vectors().len());
    }
}
