use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::EncodingError;

use super::{GENESIS_PAYLOAD, PREVIOUS_HASH_SENTINEL};

/// Block metadata: identity, linkage and Proof-of-Work fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockHeader {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub previous_hash: String,
    pub nonce: u64,   // Proof-of-Work nonce
    pub hash: String, // Cached hash of the block
}

/// Block payload. The core never interprets it; it only feeds the
/// canonical JSON form into the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockBody {
    pub data: Value,
}

/// A single block in the chain: header plus opaque body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub body: BlockBody,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    /// Genesis is never mined; its hash is accepted as computed here.
    pub fn genesis(timestamp: i64) -> Result<Self, EncodingError> {
        let mut block = Self {
            header: BlockHeader {
                index: 0,
                timestamp,
                previous_hash: String::from(PREVIOUS_HASH_SENTINEL),
                nonce: 0,
                hash: String::new(),
            },
            body: BlockBody {
                data: Value::String(GENESIS_PAYLOAD.to_string()),
            },
        };
        block.header.hash = block.compute_hash()?;
        Ok(block)
    }

    /// Create a new candidate block (not mined yet). `previous_hash`
    /// starts as the sentinel placeholder; `Blockchain::append` overwrites
    /// it with the tip hash before mining.
    pub fn new(index: u64, timestamp: i64, data: Value) -> Result<Self, EncodingError> {
        let mut block = Self {
            header: BlockHeader {
                index,
                timestamp,
                previous_hash: String::from(PREVIOUS_HASH_SENTINEL),
                nonce: 0,
                hash: String::new(),
            },
            body: BlockBody { data },
        };
        block.header.hash = block.compute_hash()?;
        Ok(block)
    }

    /// Compute the SHA-256 hash of this block from its current fields
    /// (excluding the cached `hash` itself). The payload is canonicalized
    /// to JSON and joined with the header fields in the fixed order
    /// `index:timestamp:previous_hash:data:nonce`; changing the order or
    /// the canonicalization is a wire-incompatible change.
    pub fn compute_hash(&self) -> Result<String, EncodingError> {
        let payload = serde_json::to_string(&self.body.data)?;
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.header.index,
            self.header.timestamp,
            self.header.previous_hash,
            payload,
            self.header.nonce
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Perform Proof-of-Work: recompute the hash, and while it does not
    /// start with `difficulty` leading `'0'` hex characters, bump the
    /// nonce and recompute. Difficulty 0 is satisfied by any hash, so it
    /// settles in a single attempt with the nonce untouched.
    ///
    /// The search has no iteration cap: expected attempts grow as 16^d
    /// and the worst case is unbounded. The loop blocks the calling
    /// thread until a nonce is found. Only `nonce` and `hash` change.
    pub fn mine(&mut self, difficulty: u32) -> Result<(), EncodingError> {
        let target_prefix = "0".repeat(difficulty as usize);
        loop {
            self.header.hash = self.compute_hash()?;
            if self.header.hash.starts_with(&target_prefix) {
                break;
            }
            self.header.nonce = self.header.nonce.wrapping_add(1);
        }
        info!(
            "MINER - sealed block #{} (hash={}, nonce={})",
            self.header.index, self.header.hash, self.header.nonce
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use serde_json::json;

    #[test]
    fn genesis_has_valid_hash() {
        let b = Block::genesis(1_600_000_000).expect("genesis");
        assert_eq!(b.header.index, 0);
        assert_eq!(b.header.previous_hash, "0");
        assert_eq!(b.header.nonce, 0);
        assert_eq!(b.header.hash, b.compute_hash().expect("hash"));
        assert_eq!(b.header.hash.len(), 64);
    }

    #[test]
    fn hash_is_deterministic() {
        let b = Block::new(1, 1_600_000_000, json!({"memo": "hello"})).expect("block");
        assert_eq!(
            b.compute_hash().expect("hash"),
            b.compute_hash().expect("hash")
        );
    }

    #[test]
    fn hash_changes_with_every_field() {
        let base = Block::new(1, 1_600_000_000, json!("payload")).expect("block");
        let base_hash = base.compute_hash().expect("hash");

        let mut b = base.clone();
        b.header.index += 1;
        assert_ne!(base_hash, b.compute_hash().expect("hash"));

        let mut b = base.clone();
        b.header.timestamp += 1;
        assert_ne!(base_hash, b.compute_hash().expect("hash"));

        let mut b = base.clone();
        b.header.previous_hash = "f".repeat(64);
        assert_ne!(base_hash, b.compute_hash().expect("hash"));

        let mut b = base.clone();
        b.header.nonce += 1;
        assert_ne!(base_hash, b.compute_hash().expect("hash"));

        let mut b = base.clone();
        b.body.data = json!("other payload");
        assert_ne!(base_hash, b.compute_hash().expect("hash"));
    }

    #[test]
    fn mining_produces_leading_zeros() {
        let mut b = Block::new(1, 1_600_000_000, json!("mine me")).expect("block");
        b.mine(2).expect("mine");
        assert!(b.header.hash.starts_with("00"));
        assert_eq!(b.header.hash, b.compute_hash().expect("hash"));
    }

    #[test]
    fn difficulty_zero_is_a_single_attempt() {
        let mut b = Block::new(1, 1_600_000_000, json!("trivial")).expect("block");
        b.mine(0).expect("mine");
        assert_eq!(b.header.nonce, 0);
        assert_eq!(b.header.hash, b.compute_hash().expect("hash"));
    }
}
