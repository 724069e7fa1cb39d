use thiserror::Error;

/// The block payload could not be canonicalized to JSON for hashing.
#[derive(Error, Debug)]
#[error("payload encoding failed: {0}")]
pub struct EncodingError(#[from] serde_json::Error);

/// Errors from chain operations.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Structurally unreachable once construction has completed; the
    /// chain always holds at least the genesis block.
    #[error("chain has no blocks")]
    Empty,
}
