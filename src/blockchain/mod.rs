pub mod block;
pub mod model;

pub use block::{Block, BlockBody, BlockHeader};
pub use model::{Blockchain, Verdict};

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// `previous_hash` sentinel used by the genesis block and by candidate
/// blocks that have not been linked into a chain yet.
pub const PREVIOUS_HASH_SENTINEL: &str = "0";

/// Fixed payload label of the genesis block.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";
