//! Minimal append-only, tamper-evident ledger.
//!
//! Blocks are linked by SHA-256 hash and sealed by Proof-of-Work: a nonce
//! search until the block hash carries the required number of leading zero
//! hex characters. [`Blockchain::validate`] walks the chain and reports
//! the first tampered or unlinked block.
//!
//! Single-writer and in-memory: no networking, no consensus, no
//! persistence, no transaction model. The payload of a block is an opaque
//! JSON value.

pub mod blockchain;
pub mod error;

pub use blockchain::{Block, Blockchain, Verdict};
pub use error::{ChainError, EncodingError};
