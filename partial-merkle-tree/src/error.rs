use thiserror::Error;

use crate::Hash;

/// Alias for `core::result::Result<T, PartialMerkleTreeError>`.
pub type Result<T> = core::result::Result<T, PartialMerkleTreeError>;

/// Errors from building, verifying or decoding a partial Merkle tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartialMerkleTreeError {
    /// Two sibling hashes under an internal node are identical.
    #[error(
        "merkle child hashes are equivalent ({}) at height {height}, position {position}",
        hex::encode(.hash)
    )]
    DuplicateChildHash {
        /// The repeated child hash.
        hash: Hash,
        /// Height of the parent node.
        height: u32,
        /// Position of the parent node within its row.
        position: u32,
    },
    /// Flag bits were left over after the traversal finished.
    #[error("tree did not consume all flag bits (used {bits_used} bits of {flag_bytes} bytes)")]
    UnconsumedFlagBits {
        /// Bits read by the traversal.
        bits_used: usize,
        /// Length of the packed flag stream.
        flag_bytes: usize,
    },
    /// Hashes were left over after the traversal finished.
    #[error("tree did not consume all hashes (used {used} of {provided})")]
    UnconsumedHashes {
        /// Hashes read by the traversal.
        used: usize,
        /// Hashes carried by the proof.
        provided: usize,
    },
    /// The reconstructed root differs from the declared one.
    #[error(
        "calculated merkle root does not match header, calculated: {}, header: {}",
        hex::encode(.calculated),
        hex::encode(.declared)
    )]
    RootMismatch {
        /// Root rebuilt from the proof.
        calculated: Hash,
        /// Root the proof claims.
        declared: Hash,
    },
    /// The traversal needed a flag bit past the end of the stream.
    #[error("tree ran out of flag bits after {bits_available} bits")]
    FlagBitsExhausted {
        /// Bits available in the flag stream.
        bits_available: usize,
    },
    /// The traversal needed a hash past the end of the list.
    #[error("tree ran out of hashes after {hashes_available} hashes")]
    HashesExhausted {
        /// Hashes available in the proof.
        hashes_available: usize,
    },
    /// A tree needs at least one leaf.
    #[error("partial merkle tree must contain at least one transaction")]
    EmptyTree,
    /// The leaf count is above the configured or representable maximum.
    #[error("too many transactions: {count} exceeds limit {limit}")]
    TooManyTransactions {
        /// Declared or supplied leaf count.
        count: u64,
        /// Maximum accepted leaf count.
        limit: u64,
    },
    /// A match vector does not line up with the leaves it describes.
    #[error("match vector has {matches} entries for {leaves} leaves")]
    MatchCountMismatch {
        /// Number of leaves.
        leaves: usize,
        /// Number of match flags.
        matches: usize,
    },
    /// Malformed encoded proof or hash.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
