//! Blocks: the immutable, hash-linked records of the ledger.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::crypto::BlockHash;
use crate::hasher::{hash_block, hash_genesis};

/// The tagged payload of a block.
///
/// Serialized as `{"genesis": true}` or `{"eventType": ..., "payload": ...}`.
/// Any other key is rejected on load: the hash covers only these fields, so
/// an extra key would otherwise ride along unverified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum BlockData {
    /// The marker carried only by block 0.
    Genesis { genesis: bool },
    /// A discrete business event.
    Event {
        #[serde(rename = "eventType")]
        event_type: String,
        payload: Value,
    },
}

impl BlockData {
    /// The genesis marker.
    pub fn genesis() -> Self {
        BlockData::Genesis { genesis: true }
    }

    /// An event with the given type and payload.
    pub fn event(event_type: impl Into<String>, payload: Value) -> Self {
        BlockData::Event {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Whether this is the genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockData::Genesis { genesis: true })
    }

    /// The event type, if this is an event.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            BlockData::Event { event_type, .. } => Some(event_type),
            BlockData::Genesis { .. } => None,
        }
    }

    /// The event payload, if this is an event.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            BlockData::Event { payload, .. } => Some(payload),
            BlockData::Genesis { .. } => None,
        }
    }

    /// The JSON value hashed by the block hasher.
    pub fn to_value(&self) -> Value {
        match self {
            BlockData::Genesis { genesis } => json!({ "genesis": genesis }),
            BlockData::Event {
                event_type,
                payload,
            } => json!({ "eventType": event_type, "payload": payload }),
        }
    }
}

/// One record in the chain.
///
/// Blocks are never mutated once written; a new event is a new block
/// derived from the current tail with [`Block::successor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Block {
    /// Position in the chain, starting at 0 for genesis.
    pub index: u64,
    /// Creation time in epoch seconds, as observed at append time.
    pub timestamp: f64,
    /// Hash of the block at `index - 1`, or [`BlockHash::ZERO`] for genesis.
    pub prev_hash: BlockHash,
    pub data: BlockData,
    pub hash: BlockHash,
}

impl Block {
    /// Create the genesis block.
    pub fn genesis(timestamp: f64) -> Self {
        let data = BlockData::genesis();
        let hash = hash_genesis(&data.to_value());
        Self {
            index: 0,
            timestamp,
            prev_hash: BlockHash::ZERO,
            data,
            hash,
        }
    }

    /// Derive the block that follows `self`.
    pub fn successor(&self, event_type: impl Into<String>, payload: Value, timestamp: f64) -> Self {
        let data = BlockData::event(event_type, payload);
        let prev_hash = self.hash;
        let hash = hash_block(&data.to_value(), timestamp, &prev_hash);
        Self {
            index: self.index + 1,
            timestamp,
            prev_hash,
            data,
            hash,
        }
    }

    /// Recompute this block's hash from its own fields.
    pub fn compute_hash(&self) -> BlockHash {
        let value = self.data.to_value();
        if self.data.is_genesis() {
            hash_genesis(&value)
        } else {
            hash_block(&value, self.timestamp, &self.prev_hash)
        }
    }

    /// Whether the stored hash matches the recomputed hash.
    pub fn has_valid_hash(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// The event type, if this is an event block.
    pub fn event_type(&self) -> Option<&str> {
        self.data.event_type()
    }
}

/// Current wall-clock time in epoch seconds.
pub fn now_secs() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_shape() {
        let g = Block::genesis(1700000000.0);
        assert_eq!(g.index, 0);
        assert_eq!(g.prev_hash, BlockHash::ZERO);
        assert!(g.data.is_genesis());
        assert!(g.has_valid_hash());
    }

    #[test]
    fn test_genesis_hash_ignores_timestamp() {
        assert_eq!(Block::genesis(1.0).hash, Block::genesis(2.0).hash);
    }

    #[test]
    fn test_successor_links_to_tail() {
        let g = Block::genesis(1700000000.0);
        let b1 = g.successor("REGISTER_BATCH", json!({"batchId": "BATCH-001"}), 1700000001.0);
        assert_eq!(b1.index, 1);
        assert_eq!(b1.prev_hash, g.hash);
        assert_eq!(b1.event_type(), Some("REGISTER_BATCH"));
        assert!(b1.has_valid_hash());
    }

    #[test]
    fn test_tampered_payload_detected() {
        let g = Block::genesis(1700000000.0);
        let mut b1 = g.successor("ALERT", json!({"temp": 35.0}), 1700000001.0);
        b1.data = BlockData::event("ALERT", json!({"temp": 21.0}));
        assert!(!b1.has_valid_hash());
    }

    #[test]
    fn test_serialized_field_names() {
        let g = Block::genesis(1700000000.5);
        let b1 = g.successor("ALERT", json!({"shipmentId": "S1"}), 1700000001.0);
        let value = serde_json::to_value(&b1).unwrap();
        assert_eq!(value["index"], json!(1));
        assert_eq!(value["prevHash"], json!(g.hash.to_hex()));
        assert_eq!(value["data"]["eventType"], json!("ALERT"));
        assert_eq!(value["data"]["payload"]["shipmentId"], json!("S1"));
        assert_eq!(value["hash"].as_str().map(str::len), Some(64));

        let gv = serde_json::to_value(&g).unwrap();
        assert_eq!(gv["data"], json!({"genesis": true}));
        assert_eq!(gv["prevHash"], json!("0".repeat(64)));
    }

    #[test]
    fn test_deserialize_both_variants() {
        let g = Block::genesis(1700000000.5);
        let b1 = g.successor("ALERT", json!({"tamper": true}), 1700000001.0);
        let text = serde_json::to_string(&vec![g.clone(), b1.clone()]).unwrap();
        let back: Vec<Block> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![g, b1]);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let g = Block::genesis(1700000000.5);
        let b1 = g.successor("ALERT", json!({"temp": 35.0}), 1700000001.0);

        let mut data_extra = serde_json::to_value(&b1).unwrap();
        data_extra["data"]["eventType2"] = json!("FORGED");
        assert!(serde_json::from_value::<Block>(data_extra).is_err());

        let mut block_extra = serde_json::to_value(&b1).unwrap();
        block_extra["approvedBy"] = json!("mallory");
        assert!(serde_json::from_value::<Block>(block_extra).is_err());

        let mut genesis_extra = serde_json::to_value(&g).unwrap();
        genesis_extra["data"]["payload"] = json!({});
        assert!(serde_json::from_value::<Block>(genesis_extra).is_err());
    }
}
