use chrono::Utc;
use log::debug;
use serde::Serialize;

use crate::error::{ChainError, EncodingError};

use super::{Block, PREVIOUS_HASH_SENTINEL};

/// Outcome of a full-chain audit. Tampering surfaces as a classification
/// with the offending block index, never as a panic or a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Every block passed linkage and integrity checks.
    Valid,
    /// A block's cached hash no longer matches its content.
    Tampered { index: u64 },
    /// A block's `previous_hash` does not equal its predecessor's hash.
    Unlinked { index: u64 },
}

/// Simple in-memory append-only chain with Proof-of-Work.
///
/// Always holds at least the genesis block; blocks only enter through
/// [`Blockchain::append`]. A block is logically frozen once appended —
/// mutating it afterwards is tampering, which [`Blockchain::validate`]
/// exists to catch.
#[derive(Debug, Serialize)]
pub struct Blockchain {
    pub chain: Vec<Block>,
}

impl Blockchain {
    /// Initialize a new chain rooted at a genesis block stamped with the
    /// current UTC time.
    pub fn new() -> Result<Self, EncodingError> {
        let genesis = Block::genesis(Utc::now().timestamp())?;
        Ok(Self {
            chain: vec![genesis],
        })
    }

    /// Return the last block in the chain. `ChainError::Empty` is
    /// unreachable after construction.
    pub fn latest(&self) -> Result<&Block, ChainError> {
        self.chain.last().ok_or(ChainError::Empty)
    }

    /// Link, mine and push a candidate block. The candidate's
    /// `previous_hash` and `index` are overwritten from the current tip
    /// before mining, so the chain invariant holds regardless of what the
    /// caller put there. Difficulty is caller-chosen per call; any value,
    /// including 0, is accepted.
    ///
    /// Blocks the calling thread until mining completes.
    pub fn append(&mut self, mut candidate: Block, difficulty: u32) -> Result<&Block, ChainError> {
        let tip = self.latest()?;
        candidate.header.index = tip.header.index + 1;
        candidate.header.previous_hash = tip.header.hash.clone();

        candidate.mine(difficulty)?;

        debug!(
            "CHAIN - appended block #{} at difficulty {difficulty} (len={})",
            candidate.header.index,
            self.chain.len() + 1
        );
        self.chain.push(candidate);
        self.latest()
    }

    /// Audit the whole chain, scanning from index 1. Each block is checked
    /// for linkage before content integrity: a rewritten `previous_hash`
    /// also breaks hash recomputation, and it should classify as
    /// `Unlinked`, not `Tampered`. Stops at the first failure.
    ///
    /// A genesis-only chain is trivially valid.
    pub fn validate(&self) -> Result<Verdict, EncodingError> {
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.header.previous_hash != prev.header.hash {
                return Ok(Verdict::Unlinked {
                    index: current.header.index,
                });
            }

            if current.header.hash != current.compute_hash()? {
                return Ok(Verdict::Tampered {
                    index: current.header.index,
                });
            }
        }
        Ok(Verdict::Valid)
    }

    /// True when the genesis block looks untouched: index 0, sentinel
    /// `previous_hash`, hash matching content.
    pub fn genesis_intact(&self) -> Result<bool, EncodingError> {
        let Some(genesis) = self.chain.first() else {
            return Ok(false);
        };
        Ok(genesis.header.index == 0
            && genesis.header.previous_hash == PREVIOUS_HASH_SENTINEL
            && genesis.header.hash == genesis.compute_hash()?)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Iterate the blocks in order, genesis first.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.chain.iter()
    }
}
