//! Chain validation: contiguity, linkage, and hash correctness.

use crate::block::Block;
use crate::crypto::BlockHash;
use crate::error::ChainError;

/// Index and hash of the last block of a verified chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainHead {
    pub index: u64,
    pub hash: BlockHash,
}

impl ChainHead {
    /// Number of blocks in the chain, genesis included.
    pub fn len(&self) -> u64 {
        self.index + 1
    }

    /// Always false: a verified chain holds at least the genesis block.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Validate a single block against its expected position and predecessor.
///
/// This performs:
/// - Index check against `position`
/// - Genesis shape (block 0 only): marker data and zero `prev_hash`
/// - Linkage to `prev` for every other block
/// - Hash recomputation
pub fn verify_block(block: &Block, position: u64, prev: Option<&Block>) -> Result<(), ChainError> {
    // 1. Contiguity
    if block.index != position {
        return Err(ChainError::IndexMismatch {
            position,
            index: block.index,
        });
    }

    // 2. Genesis shape / linkage
    match prev {
        None => {
            if !block.data.is_genesis() {
                return Err(ChainError::BadGenesis("missing genesis marker".into()));
            }
            if block.prev_hash != BlockHash::ZERO {
                return Err(ChainError::BadGenesis(format!(
                    "prev_hash is {}, expected zero sentinel",
                    block.prev_hash
                )));
            }
        }
        Some(prev) => {
            if block.data.is_genesis() {
                return Err(ChainError::MisplacedGenesis { index: block.index });
            }
            if block.prev_hash != prev.hash {
                return Err(ChainError::LinkageMismatch {
                    index: block.index,
                    expected: prev.hash,
                    got: block.prev_hash,
                });
            }
        }
    }

    // 3. Hash correctness
    let computed = block.compute_hash();
    if computed != block.hash {
        return Err(ChainError::HashMismatch {
            index: block.index,
            stored: block.hash,
            computed,
        });
    }

    Ok(())
}

/// Verify an entire chain, genesis first.
///
/// Returns the head of the chain if every block passes [`verify_block`].
pub fn verify_chain(chain: &[Block]) -> Result<ChainHead, ChainError> {
    let mut prev: Option<&Block> = None;
    for (position, block) in chain.iter().enumerate() {
        verify_block(block, position as u64, prev)?;
        prev = Some(block);
    }

    prev.map(|b| ChainHead {
        index: b.index,
        hash: b.hash,
    })
    .ok_or(ChainError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockData;
    use serde_json::json;

    fn make_chain(n: usize) -> Vec<Block> {
        let mut chain = vec![Block::genesis(1700000000.0)];
        for i in 1..=n {
            let tail = chain.last().unwrap();
            let next = tail.successor(
                "ALERT",
                json!({"shipmentId": format!("SHIP-SIM-{i}"), "temp": 31.5}),
                1700000000.0 + i as f64,
            );
            chain.push(next);
        }
        chain
    }

    #[test]
    fn test_valid_chain() {
        let chain = make_chain(5);
        let head = verify_chain(&chain).unwrap();
        assert_eq!(head.index, 5);
        assert_eq!(head.len(), 6);
        assert_eq!(head.hash, chain[5].hash);
    }

    #[test]
    fn test_genesis_only() {
        let chain = make_chain(0);
        assert_eq!(verify_chain(&chain).unwrap().index, 0);
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(verify_chain(&[]), Err(ChainError::Empty));
    }

    #[test]
    fn test_index_gap() {
        let mut chain = make_chain(3);
        chain.remove(2);
        assert!(matches!(
            verify_chain(&chain),
            Err(ChainError::IndexMismatch { position: 2, index: 3 })
        ));
    }

    #[test]
    fn test_broken_linkage() {
        let mut chain = make_chain(3);
        chain[2].prev_hash = BlockHash::from_bytes([0xee; 32]);
        // Rehash so only the linkage is wrong.
        chain[2].hash = chain[2].compute_hash();
        assert!(matches!(
            verify_chain(&chain),
            Err(ChainError::LinkageMismatch { index: 2, .. })
        ));
    }

    #[test]
    fn test_tampered_payload() {
        let mut chain = make_chain(3);
        chain[1].data = BlockData::event("ALERT", json!({"shipmentId": "SHIP-SIM-1", "temp": 20.0}));
        assert!(matches!(
            verify_chain(&chain),
            Err(ChainError::HashMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_bad_genesis() {
        let mut chain = make_chain(1);
        chain[0].prev_hash = BlockHash::from_bytes([0x01; 32]);
        assert!(matches!(verify_chain(&chain), Err(ChainError::BadGenesis(_))));

        let not_genesis = make_chain(1)[1].clone();
        assert!(matches!(
            verify_chain(&[Block { index: 0, ..not_genesis }]),
            Err(ChainError::BadGenesis(_))
        ));
    }

    #[test]
    fn test_misplaced_genesis() {
        let mut chain = make_chain(1);
        let mut fake = Block::genesis(1700000005.0);
        fake.index = 2;
        fake.prev_hash = chain[1].hash;
        chain.push(fake);
        assert!(matches!(
            verify_chain(&chain),
            Err(ChainError::MisplacedGenesis { index: 2 })
        ));
    }
}
