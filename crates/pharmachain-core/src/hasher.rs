//! The block hasher.
//!
//! Non-genesis blocks hash `canonical(data) || timestamp || prev_hash_hex`.
//! The genesis block hashes `canonical(data)` alone. Existing ledger files
//! rely on this asymmetry; it must not change without a version marker.

use serde_json::Value;

use crate::canonical::{canonical_bytes, format_float};
use crate::crypto::BlockHash;

/// Hash a non-genesis block from its data, timestamp, and predecessor hash.
pub fn hash_block(data: &Value, timestamp: f64, prev_hash: &BlockHash) -> BlockHash {
    let data_bytes = canonical_bytes(data);
    let ts = format_timestamp(timestamp);
    let prev = prev_hash.to_hex();
    BlockHash::digest(&[data_bytes.as_slice(), ts.as_bytes(), prev.as_bytes()])
}

/// Hash the genesis block's data.
pub fn hash_genesis(data: &Value) -> BlockHash {
    BlockHash::digest(&[canonical_bytes(data).as_slice()])
}

/// Render an epoch-seconds timestamp the way it is folded into a hash.
///
/// Shortest round-trip decimal with a mandatory fractional part, e.g.
/// `1700000000.5` or `1700000000.0`.
pub fn format_timestamp(timestamp: f64) -> String {
    format_float(timestamp)
}
